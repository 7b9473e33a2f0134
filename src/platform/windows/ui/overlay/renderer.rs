//! Direct2D overlay rendering.
//!
//! Draws the scene and the status panel into a 32-bit DIB through a DC
//! render target, then pushes it with UpdateLayeredWindow for per-pixel
//! alpha. The window never paints through WM_PAINT.

use std::cell::RefCell;

use windows::core::w;
use windows::Win32::Foundation::{COLORREF, HWND, POINT, RECT, SIZE};
use windows::Win32::Graphics::Direct2D::Common::{
    D2D1_ALPHA_MODE_PREMULTIPLIED, D2D1_COLOR_F, D2D1_PIXEL_FORMAT, D2D_RECT_F,
};
use windows::Win32::Graphics::Direct2D::{
    ID2D1DCRenderTarget, ID2D1Factory, ID2D1RenderTarget, ID2D1StrokeStyle,
    D2D1_ANTIALIAS_MODE_PER_PRIMITIVE, D2D1_CAP_STYLE_ROUND, D2D1_DASH_STYLE_SOLID,
    D2D1_DRAW_TEXT_OPTIONS_NONE, D2D1_ELLIPSE, D2D1_LINE_JOIN_ROUND,
    D2D1_RENDER_TARGET_PROPERTIES, D2D1_RENDER_TARGET_TYPE_DEFAULT,
    D2D1_RENDER_TARGET_USAGE_NONE, D2D1_STROKE_STYLE_PROPERTIES,
};
use windows::Win32::Graphics::DirectWrite::{
    IDWriteFactory, IDWriteTextLayout, DWRITE_FONT_STRETCH_NORMAL, DWRITE_FONT_STYLE_NORMAL,
    DWRITE_FONT_WEIGHT_BOLD, DWRITE_TEXT_METRICS,
};
use windows::Win32::Graphics::Dxgi::Common::DXGI_FORMAT_B8G8R8A8_UNORM;
use windows::Win32::Graphics::Gdi::{
    CreateCompatibleDC, CreateDIBSection, DeleteDC, DeleteObject, GetDC, ReleaseDC, SelectObject,
    BITMAPINFO, BITMAPINFOHEADER, BI_RGB, BLENDFUNCTION, DIB_RGB_COLORS,
};
use windows::Win32::UI::WindowsAndMessaging::{
    SetWindowPos, UpdateLayeredWindow, HWND_TOPMOST, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE,
    ULW_ALPHA,
};
use windows_numerics::Vector2;

use crate::app::StatusBoard;
use crate::i18n::Language;
use crate::model::constants::*;
use crate::overlay::{format_distance, Annotation, Color, LabelBox, Scene, Viewport};

thread_local! {
    pub static D2D_FACTORY: RefCell<Option<ID2D1Factory>> = const { RefCell::new(None) };
    pub static DWRITE_FACTORY: RefCell<Option<IDWriteFactory>> = const { RefCell::new(None) };
}

/// Everything one frame needs.
pub struct Frame<'a> {
    pub hwnd: HWND,
    pub viewport: Viewport,
    pub primary_width: i32,
    pub scene: &'a Scene,
    pub board: &'a StatusBoard,
    pub language: Language,
}

/// Redraw the overlay. Does nothing until both factories exist.
pub fn render(frame: &Frame<'_>) {
    D2D_FACTORY.with(|d2d| {
        DWRITE_FACTORY.with(|dw| {
            if let (Some(d2d), Some(dw)) = (d2d.borrow().as_ref(), dw.borrow().as_ref()) {
                unsafe { update_layered_window_d2d(frame, d2d, dw) };
            }
        });
    });
}

fn d2d_color(c: Color) -> D2D1_COLOR_F {
    D2D1_COLOR_F {
        r: c.r,
        g: c.g,
        b: c.b,
        a: c.a,
    }
}

unsafe fn update_layered_window_d2d(
    frame: &Frame<'_>,
    factory: &ID2D1Factory,
    dwrite: &IDWriteFactory,
) {
    let Viewport {
        x: offset_x,
        y: offset_y,
        width,
        height,
    } = frame.viewport;

    let screen_dc = GetDC(None);
    let mem_dc = CreateCompatibleDC(Some(screen_dc));

    let bmi = BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: width,
            biHeight: -height, // Top-down
            biPlanes: 1,
            biBitCount: 32,
            biCompression: BI_RGB.0,
            ..Default::default()
        },
        ..Default::default()
    };

    let mut bits: *mut std::ffi::c_void = std::ptr::null_mut();
    let bitmap = match CreateDIBSection(Some(mem_dc), &bmi, DIB_RGB_COLORS, &mut bits, None, 0) {
        Ok(bitmap) if !bits.is_null() => bitmap,
        _ => {
            log::warn!("CreateDIBSection failed for {}x{} overlay", width, height);
            ReleaseDC(None, screen_dc);
            let _ = DeleteDC(mem_dc);
            return;
        }
    };
    let old_bitmap = SelectObject(mem_dc, bitmap.into());

    let rt_props = D2D1_RENDER_TARGET_PROPERTIES {
        r#type: D2D1_RENDER_TARGET_TYPE_DEFAULT,
        pixelFormat: D2D1_PIXEL_FORMAT {
            format: DXGI_FORMAT_B8G8R8A8_UNORM,
            alphaMode: D2D1_ALPHA_MODE_PREMULTIPLIED,
        },
        dpiX: 96.0,
        dpiY: 96.0,
        usage: D2D1_RENDER_TARGET_USAGE_NONE,
        minLevel: Default::default(),
    };

    let stroke_props = D2D1_STROKE_STYLE_PROPERTIES {
        startCap: D2D1_CAP_STYLE_ROUND,
        endCap: D2D1_CAP_STYLE_ROUND,
        dashCap: D2D1_CAP_STYLE_ROUND,
        lineJoin: D2D1_LINE_JOIN_ROUND,
        miterLimit: 1.0,
        dashStyle: D2D1_DASH_STYLE_SOLID,
        dashOffset: 0.0,
    };
    let stroke_style: Option<ID2D1StrokeStyle> =
        factory.CreateStrokeStyle(&stroke_props, None).ok();

    let render_target: windows::core::Result<ID2D1DCRenderTarget> =
        factory.CreateDCRenderTarget(&rt_props);

    if let Ok(dc_rt) = render_target {
        let rect = RECT {
            left: 0,
            top: 0,
            right: width,
            bottom: height,
        };

        if dc_rt.BindDC(mem_dc, &rect).is_ok() {
            let rt: ID2D1RenderTarget = dc_rt.into();

            rt.BeginDraw();
            rt.Clear(Some(&D2D1_COLOR_F {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 0.0,
            }));

            if frame.scene.is_visible() {
                rt.SetAntialiasMode(D2D1_ANTIALIAS_MODE_PER_PRIMITIVE);
                let painter = Painter {
                    rt: &rt,
                    dwrite,
                    stroke_style: stroke_style.as_ref(),
                };
                // Lines first so markers sit on top of their ends.
                for annotation in frame.scene.annotations() {
                    if let Annotation::Line {
                        from, to, color, ..
                    } = annotation
                    {
                        let (x0, y0) = frame.viewport.to_local(*from);
                        let (x1, y1) = frame.viewport.to_local(*to);
                        painter.line((x0, y0), (x1, y1), *color);
                    }
                }
                for annotation in frame.scene.annotations() {
                    match annotation {
                        Annotation::Marker {
                            center,
                            color,
                            label,
                        } => {
                            painter.marker(frame.viewport.to_local(*center), *color);
                            painter.label(
                                &LabelBox::for_marker(*center, &frame.viewport),
                                label,
                                Color::WHITE,
                            );
                        }
                        Annotation::Line {
                            from,
                            to,
                            color,
                            meters,
                        } => {
                            painter.label(
                                &LabelBox::for_distance(*from, *to, &frame.viewport),
                                &format_distance(*meters, frame.language),
                                *color,
                            );
                        }
                    }
                }
                painter.hud(frame.viewport.hud_origin(frame.primary_width), frame.board);
            }

            if let Err(e) = rt.EndDraw(None, None) {
                log::warn!("EndDraw failed: {e}");
            }
        }
    }

    let pt_src = POINT { x: 0, y: 0 };
    let size = SIZE {
        cx: width,
        cy: height,
    };
    let pt_dst = POINT {
        x: offset_x,
        y: offset_y,
    };

    let blend = BLENDFUNCTION {
        BlendOp: 0,
        BlendFlags: 0,
        SourceConstantAlpha: 255,
        AlphaFormat: 1,
    };

    let _ = UpdateLayeredWindow(
        frame.hwnd,
        Some(screen_dc),
        Some(&pt_dst),
        Some(&size),
        Some(mem_dc),
        Some(&pt_src),
        COLORREF(0),
        Some(&blend),
        ULW_ALPHA,
    );

    // Games that go fullscreen push themselves above; re-assert on every frame.
    let _ = SetWindowPos(
        frame.hwnd,
        Some(HWND_TOPMOST),
        0,
        0,
        0,
        0,
        SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
    );

    SelectObject(mem_dc, old_bitmap);
    let _ = DeleteObject(bitmap.into());
    let _ = DeleteDC(mem_dc);
    ReleaseDC(None, screen_dc);
}

struct Painter<'a> {
    rt: &'a ID2D1RenderTarget,
    dwrite: &'a IDWriteFactory,
    stroke_style: Option<&'a ID2D1StrokeStyle>,
}

impl Painter<'_> {
    unsafe fn line(&self, from: (f32, f32), to: (f32, f32), color: Color) {
        if let Ok(brush) = self.rt.CreateSolidColorBrush(&d2d_color(color), None) {
            self.rt.DrawLine(
                Vector2::new(from.0, from.1),
                Vector2::new(to.0, to.1),
                &brush,
                LINE_WIDTH,
                self.stroke_style,
            );
        }
    }

    unsafe fn marker(&self, center: (f32, f32), color: Color) {
        let ellipse = D2D1_ELLIPSE {
            point: Vector2::new(center.0, center.1),
            radiusX: MARKER_RADIUS,
            radiusY: MARKER_RADIUS,
        };
        if let Ok(fill) = self.rt.CreateSolidColorBrush(&d2d_color(color), None) {
            self.rt.FillEllipse(&ellipse, &fill);
        }
        if let Ok(outline) = self.rt.CreateSolidColorBrush(&d2d_color(Color::WHITE), None) {
            self.rt
                .DrawEllipse(&ellipse, &outline, MARKER_OUTLINE_WIDTH, self.stroke_style);
        }
    }

    unsafe fn layout(
        &self,
        text: &str,
        font_size: f32,
        max_width: f32,
    ) -> Option<(IDWriteTextLayout, f32, f32)> {
        let format = self
            .dwrite
            .CreateTextFormat(
                w!("Segoe UI"),
                None,
                DWRITE_FONT_WEIGHT_BOLD,
                DWRITE_FONT_STYLE_NORMAL,
                DWRITE_FONT_STRETCH_NORMAL,
                font_size,
                w!("en-us"),
            )
            .ok()?;
        let utf16: Vec<u16> = text.encode_utf16().collect();
        let layout = self
            .dwrite
            .CreateTextLayout(&utf16, &format, max_width, f32::MAX)
            .ok()?;
        let mut metrics = DWRITE_TEXT_METRICS::default();
        layout.GetMetrics(&mut metrics).ok()?;
        Some((layout, metrics.width, metrics.height))
    }

    /// Text on a dark box.
    unsafe fn label(&self, place: &LabelBox, text: &str, color: Color) {
        let Some((layout, w, h)) = self.layout(text, place.font_size, f32::MAX) else {
            return;
        };
        let (left, top, right, bottom) = place.rect(w, h);
        let background = Color::rgba(0, 0, 0, LABEL_BACKGROUND_ALPHA);
        if let Ok(bg) = self.rt.CreateSolidColorBrush(&d2d_color(background), None) {
            self.rt.FillRectangle(
                &D2D_RECT_F {
                    left,
                    top,
                    right,
                    bottom,
                },
                &bg,
            );
        }
        if let Ok(fg) = self.rt.CreateSolidColorBrush(&d2d_color(color), None) {
            let (x, y) = place.text_origin();
            self.rt.DrawTextLayout(
                Vector2::new(x, y),
                &layout,
                &fg,
                D2D1_DRAW_TEXT_OPTIONS_NONE,
            );
        }
    }

    /// Status panel: one line per board entry, warnings in red.
    unsafe fn hud(&self, origin: (f32, f32), board: &StatusBoard) {
        let padding = HUD_MARGIN / 2.0;
        let lines: Vec<_> = board
            .lines()
            .filter_map(|(text, warning)| {
                self.layout(text, HUD_FONT_SIZE, HUD_WIDTH - 2.0 * padding)
                    .map(|(layout, _, h)| (layout, h, warning))
            })
            .collect();
        if lines.is_empty() {
            return;
        }

        let height: f32 = lines.iter().map(|(_, h, _)| h).sum::<f32>() + 2.0 * padding;
        let background = Color::rgba(0, 0, 0, LABEL_BACKGROUND_ALPHA);
        if let Ok(bg) = self.rt.CreateSolidColorBrush(&d2d_color(background), None) {
            self.rt.FillRectangle(
                &D2D_RECT_F {
                    left: origin.0,
                    top: origin.1,
                    right: origin.0 + HUD_WIDTH,
                    bottom: origin.1 + height,
                },
                &bg,
            );
        }

        let mut y = origin.1 + padding;
        for (layout, h, warning) in lines {
            let color = if warning { Color::RED } else { Color::WHITE };
            if let Ok(fg) = self.rt.CreateSolidColorBrush(&d2d_color(color), None) {
                self.rt.DrawTextLayout(
                    Vector2::new(origin.0 + padding, y),
                    &layout,
                    &fg,
                    D2D1_DRAW_TEXT_OPTIONS_NONE,
                );
            }
            y += h;
        }
    }
}

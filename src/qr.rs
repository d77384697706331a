use qrcode::QrCode;
use qrcode::render::svg;

use crate::errors::AppError;

const FOREGROUND: &str = "#fff";
const BACKGROUND: &str = "#111";
const MIN_SIZE_PX: u32 = 256;

/// Where the page hosting the dialog is being viewed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayContext {
    pub host: String,
    pub path: String,
}

impl DisplayContext {
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
        }
    }

    /// Text encoded into the QR code: host immediately followed by path.
    pub fn payload(&self) -> String {
        format!("{}{}", self.host, self.path)
    }
}

/// Render `payload` as an inline SVG document.
pub fn render_svg(payload: &str) -> Result<String, AppError> {
    let code = QrCode::new(payload.as_bytes())?;
    Ok(code
        .render::<svg::Color<'_>>()
        .min_dimensions(MIN_SIZE_PX, MIN_SIZE_PX)
        .dark_color(svg::Color(FOREGROUND))
        .light_color(svg::Color(BACKGROUND))
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_host_then_path() {
        let ctx = DisplayContext::new("meet.example.com", "/orgs/acme/meetings/standup");
        assert_eq!(ctx.payload(), "meet.example.com/orgs/acme/meetings/standup");
    }

    #[test]
    fn renders_svg_with_dialog_colors() {
        let svg = render_svg("meet.example.com/orgs/acme/meetings/standup").unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains(FOREGROUND));
        assert!(svg.contains(BACKGROUND));
    }
}

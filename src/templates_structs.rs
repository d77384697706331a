// Template context structures for Askama templates.

use askama::Template;

/// Button plus `<dialog>` showing a QR code that links to the meeting page.
#[derive(Template)]
#[template(path = "meetings/qr_dialog.html")]
pub struct QrDialogTemplate {
    pub meeting_name: String,
    /// Encoded text, also shown under the code for manual entry.
    pub payload: String,
    /// Pre-rendered SVG; inserted unescaped.
    pub svg: String,
}

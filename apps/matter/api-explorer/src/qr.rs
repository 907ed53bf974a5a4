//! Terminal QR rendering for the login session token

use qrcode::QrCode;
use qrcode::QrResult;
use qrcode::render::unicode::Dense1x2;

/// Render `session_token` as a QR code made of half-block characters, two
/// modules per terminal row.
pub fn render_session_qr(session_token: &str) -> QrResult<String> {
    let code = QrCode::new(session_token.as_bytes())?;
    Ok(code
        .render::<Dense1x2>()
        .dark_color(Dense1x2::Light)
        .light_color(Dense1x2::Dark)
        .build())
}

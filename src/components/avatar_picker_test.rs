use super::*;

#[test]
fn avatar_src_falls_back_to_logo_when_preview_empty() {
    assert_eq!(avatar_src(""), "/logo.jpg");
}

#[test]
fn avatar_src_uses_preview_when_present() {
    assert_eq!(avatar_src("data:image/png;base64,AA=="), "data:image/png;base64,AA==");
}

#[test]
fn avatar_hint_reports_limit_in_kib() {
    assert_eq!(avatar_hint(800 * 1024), "JPG, GIF or PNG. Max size of 800K");
}

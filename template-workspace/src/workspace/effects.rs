use crate::notifications::Severity;

use super::state::GenerationResult;

pub const FALLBACK_DOWNLOAD_NAME: &str = "generated";

/// Side effects the controller needs from whatever renders it. Keeps the
/// decision logic free of any drawing or windowing concerns.
pub trait UiEffects: Send {
    fn notify(&mut self, message: &str, severity: Severity);

    fn present_result(&mut self, result: &GenerationResult);

    fn copy_to_clipboard(&mut self, text: &str) -> anyhow::Result<()>;

    fn trigger_download(&mut self, file_name: &str, contents: &str) -> anyhow::Result<()>;

    /// Hands control to the re-authentication entry point.
    fn redirect_to_login(&mut self);
}

/// File name for a downloaded result: the draft name, or the fallback when
/// blank, with `.html` appended unless already present.
pub fn download_file_name(draft_name: &str) -> String {
    let base = draft_name.trim();
    let base = if base.is_empty() {
        FALLBACK_DOWNLOAD_NAME
    } else {
        base
    };

    if base.to_ascii_lowercase().ends_with(".html") {
        base.to_string()
    } else {
        format!("{}.html", base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_file_name() {
        assert_eq!(download_file_name("invoice"), "invoice.html");
        assert_eq!(download_file_name("page.html"), "page.html");
        assert_eq!(download_file_name("Report.HTML"), "Report.HTML");
        assert_eq!(download_file_name(""), "generated.html");
        assert_eq!(download_file_name("   "), "generated.html");
    }
}

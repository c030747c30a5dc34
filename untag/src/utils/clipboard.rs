//! System clipboard access, behind the `clipboard` feature.

use anyhow::Result;

#[cfg(feature = "clipboard")]
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    use anyhow::Context;

    let mut clipboard = arboard::Clipboard::new().context("Failed to access the system clipboard")?;
    clipboard
        .set_text(text.to_string())
        .context("Failed to write to the system clipboard")?;
    log::debug!("Copied {} byte(s) to the clipboard.", text.len());
    Ok(())
}

#[cfg(not(feature = "clipboard"))]
pub fn copy_to_clipboard(_text: &str) -> Result<()> {
    anyhow::bail!("untag was built without the `clipboard` feature")
}

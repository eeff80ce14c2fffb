//! Shared helpers for report generation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use seat_model::RollId;

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}

/// Ensure an output subdirectory exists and return its path.
pub fn ensure_output_dir(base_dir: &Path, name: &str) -> Result<PathBuf> {
    let dir = base_dir.join(name);
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Make `text` safe as a single path component.
///
/// Whitespace and path separators become `_`.
pub fn file_segment(text: &str) -> String {
    text.trim()
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' => '_',
            ch if ch.is_whitespace() => '_',
            ch => ch,
        })
        .collect()
}

/// `<photos>/<roll>.jpg` when that file exists.
pub fn photo_path(photos_dir: Option<&Path>, roll: &RollId) -> Option<PathBuf> {
    let path = photos_dir?.join(format!("{roll}.jpg"));
    path.is_file().then_some(path)
}

/// Write a finished document, creating parent directories.
pub fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut file = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    file.write_all(contents)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write a simple text element.
pub fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Write an element with a `class` attribute and text content.
pub fn write_classed_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    class: &str,
    text: &str,
) -> Result<()> {
    let mut start = BytesStart::new(name);
    start.push_attribute(("class", class));
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Photo cell content: an `<img>` when the photo exists, else "No Photo".
pub fn write_photo<W: Write>(writer: &mut Writer<W>, photo: Option<&Path>) -> Result<()> {
    match photo {
        Some(path) => {
            let src = path.display().to_string();
            let mut img = BytesStart::new("img");
            img.push_attribute(("class", "photo"));
            img.push_attribute(("src", src.as_str()));
            img.push_attribute(("alt", "photo"));
            writer.write_event(Event::Empty(img))?;
        }
        None => writer.write_event(Event::Text(BytesText::new("No Photo")))?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_replace_separators_and_spaces() {
        assert_eq!(file_segment("30/04/2016"), "30_04_2016");
        assert_eq!(file_segment(" LT 103 "), "LT_103");
        assert_eq!(file_segment("6101"), "6101");
    }

    #[test]
    fn photo_requires_directory_and_file() {
        let roll = RollId::new("1401AI01").unwrap();
        assert_eq!(photo_path(None, &roll), None);
        assert_eq!(photo_path(Some(Path::new("/nonexistent/photos")), &roll), None);
    }
}

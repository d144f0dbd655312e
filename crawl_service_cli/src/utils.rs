use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::render::Export;

pub fn save_text(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    tracing::info!(path = %path.display(), "file written");
    Ok(())
}

/// Write an export into `dir` under its own file name.
pub fn save_export(export: &Export, dir: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&export.file_name);
    save_text(&export.content, &path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ExportKind;
    use tempfile::TempDir;

    #[test]
    fn export_is_written_verbatim() {
        let tmp = TempDir::new().unwrap();
        let export = Export {
            kind: ExportKind::Markdown,
            file_name: "crawled_content_1.md".into(),
            content: "# Hi\n".into(),
        };

        let path = save_export(&export, &tmp.path().join("out")).unwrap();
        assert_eq!(path.file_name().unwrap(), "crawled_content_1.md");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Hi\n");
    }
}

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use atomicwrites::{AtomicFile, OverwriteBehavior};
use log::debug;
use mapdoc::MapDocument;

use crate::error::{Result, TransformError};

/// Check that `path` names an existing regular file (symlinks are followed).
pub fn ensure_map_file(path: &Path) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(TransformError::PathIsNotAFile(path.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(TransformError::FileDoesNotExist(path.to_path_buf()))
        }
        Err(source) => Err(TransformError::FailedToOpenMap {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read and parse a map file. The file handle is released before parsing.
pub fn load_map_file(path: &Path) -> Result<MapDocument> {
    ensure_map_file(path)?;

    let mut file = File::open(path).map_err(|source| TransformError::FailedToOpenMap {
        path: path.to_path_buf(),
        source,
    })?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|source| TransformError::MapReadError {
            path: path.to_path_buf(),
            source,
        })?;
    drop(file);

    let xml = String::from_utf8(bytes).map_err(|e| TransformError::MapReadError {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidData, e),
    })?;

    debug!("Read {} bytes from {}", xml.len(), path.display());
    Ok(MapDocument::parse(&xml)?)
}

/// Serialize a map and replace `path` atomically, so a failed save never
/// leaves a truncated file behind.
pub fn save_map_file(path: &Path, doc: &MapDocument) -> Result<()> {
    let mut bytes = Vec::with_capacity(doc.source().len());
    doc.write_to(&mut bytes)?;

    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|f| {
            f.write_all(&bytes)?;
            f.flush()
        })
        .map_err(|err| {
            let source = match err {
                atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => e,
            };
            TransformError::FailedToSaveMap {
                path: path.to_path_buf(),
                source,
            }
        })?;

    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    #[test]
    fn load_reports_missing_and_directories() -> anyhow::Result<()> {
        let temp = TempDir::new()?;

        let missing = temp.child("nope.xml");
        assert_eq!(
            load_map_file(missing.path()).unwrap_err().kind(),
            ErrorKind::FileDoesNotExist
        );

        let dir = temp.child("levels");
        dir.create_dir_all()?;
        assert_eq!(
            load_map_file(dir.path()).unwrap_err().kind(),
            ErrorKind::PathIsNotAFile
        );
        Ok(())
    }

    #[test]
    fn load_rejects_invalid_utf8_and_xml() -> anyhow::Result<()> {
        let temp = TempDir::new()?;

        let binary = temp.child("binary.xml");
        binary.write_binary(&[0x3c, 0x6d, 0xff, 0xfe])?;
        assert_eq!(
            load_map_file(binary.path()).unwrap_err().kind(),
            ErrorKind::MapReadError
        );

        let broken = temp.child("broken.xml");
        broken.write_str("<map><object></map>")?;
        assert_eq!(
            load_map_file(broken.path()).unwrap_err().kind(),
            ErrorKind::MapParseError
        );
        Ok(())
    }

    #[test]
    fn save_then_load() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let input = temp.child("in.xml");
        input.write_str("<map>\n  <object posX=\"1\" posY=\"2\" posZ=\"3\"/>\n</map>\n")?;

        let doc = load_map_file(input.path())?;
        let output = temp.child("out.xml");
        save_map_file(output.path(), &doc)?;
        output.assert("<map>\n  <object posX=\"1\" posY=\"2\" posZ=\"3\"/>\n</map>\n");
        Ok(())
    }

    #[test]
    fn save_into_missing_directory_fails() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let doc = MapDocument::parse("<map/>")?;
        let target = temp.child("missing/dir/out.xml");
        assert_eq!(
            save_map_file(target.path(), &doc).unwrap_err().kind(),
            ErrorKind::FailedToSaveMap
        );
        assert!(!target.path().exists());
        Ok(())
    }
}

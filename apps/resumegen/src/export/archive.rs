use std::io::{Cursor, Write};

use zip::{write::FileOptions, CompressionMethod, ZipWriter};

use super::{site::SiteBundle, ExportError};

pub const SITE_ENTRY: &str = "index.html";
pub const README_ENTRY: &str = "README.md";

/// Packs a site bundle into a deflated ZIP with `index.html` and `README.md`
/// at the archive root.
pub fn package_site(bundle: &SiteBundle) -> Result<Vec<u8>, ExportError> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = ZipWriter::new(&mut cursor);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, contents) in [(SITE_ENTRY, &bundle.html), (README_ENTRY, &bundle.readme)] {
            writer.start_file(name, options)?;
            writer.write_all(contents.as_bytes())?;
        }
        writer.finish()?;
    }
    Ok(cursor.into_inner())
}

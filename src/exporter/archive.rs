//! 压缩包打包：按清单顺序写入 zip，整体序列化成一个内存 blob。

use std::io::{Cursor, Write};

use bytes::Bytes;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::image_handler::ImageError;

/// 单个已编码的图标条目。
#[derive(Debug, Clone)]
pub struct IconEntry {
    pub size: u32,
    pub name: String,
    pub png: Vec<u8>,
}

pub fn pack_archive(entries: &[IconEntry]) -> Result<Bytes, ImageError> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in entries {
        zip.start_file(entry.name.as_str(), options)
            .map_err(|e| ImageError::Archive(format!("写入条目 {} 失败：{}", entry.name, e)))?;
        zip.write_all(&entry.png)
            .map_err(|e| ImageError::Archive(format!("写入条目 {} 失败：{}", entry.name, e)))?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| ImageError::Archive(format!("压缩包收尾失败：{}", e)))?;

    Ok(Bytes::from(cursor.into_inner()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn archive_preserves_entry_order_and_content() {
        let entries = vec![
            IconEntry { size: 16, name: "icon_16x16.png".to_string(), png: vec![1, 2, 3] },
            IconEntry { size: 32, name: "icon_32x32.png".to_string(), png: vec![4, 5] },
        ];

        let blob = pack_archive(&entries).expect("pack should succeed");
        let mut archive = zip::ZipArchive::new(Cursor::new(blob.to_vec())).expect("valid zip");

        assert_eq!(archive.len(), 2);
        let mut first = archive.by_index(0).expect("first entry");
        assert_eq!(first.name(), "icon_16x16.png");
        let mut content = Vec::new();
        first.read_to_end(&mut content).expect("read entry");
        assert_eq!(content, vec![1, 2, 3]);
    }

    #[test]
    fn empty_entry_list_still_yields_valid_zip() {
        let blob = pack_archive(&[]).expect("pack should succeed");
        let archive = zip::ZipArchive::new(Cursor::new(blob.to_vec())).expect("valid zip");

        assert_eq!(archive.len(), 0);
    }
}

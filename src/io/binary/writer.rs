use std::io::{Seek, SeekFrom, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::{CodecError, Result};
use crate::io::binary::common::{ElementTag, LENGTH_PREFIX_BYTES};
use crate::io::stream::TokenWriter;
use crate::scalar::Coordinates;

/// Writes tokens in the length-delimited binary encoding.
///
/// Tokens are streamed straight to the underlying writer. Each array's length prefix is written
/// as a placeholder and back-patched once its end marker is written, which is why the writer must
/// also be [Seek]. `Cursor<Vec<u8>>` and `File` both qualify.
#[derive(Debug)]
pub struct BinaryWriter<W> {
    writer: W,

    /// Stream positions of the length prefixes of all currently open arrays
    open_arrays: Vec<u64>,
}

impl<W: Write + Seek> BinaryWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            open_arrays: vec![],
        }
    }

    /// The number of arrays opened but not yet closed.
    pub fn depth(&self) -> usize {
        self.open_arrays.len()
    }

    /// Return the underlying writer.
    ///
    /// Fails if any array is still open, since its length prefix would be left unpatched.
    pub fn finish(mut self) -> Result<W> {
        if !self.open_arrays.is_empty() {
            return Err(CodecError::MalformedStream(format!(
                "{} array(s) left open at end of encoding",
                self.open_arrays.len()
            )));
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_tag(&mut self, tag: ElementTag) -> Result<()> {
        self.writer.write_u8(tag.into())?;
        Ok(())
    }
}

impl<W: Write + Seek> TokenWriter for BinaryWriter<W> {
    fn write_null(&mut self) -> Result<()> {
        self.write_tag(ElementTag::Null)
    }

    fn write_array_start(&mut self) -> Result<()> {
        self.write_tag(ElementTag::ArrayStart)?;
        let prefix_position = self.writer.stream_position()?;
        self.writer.write_u32::<LittleEndian>(0)?;
        self.open_arrays.push(prefix_position);
        Ok(())
    }

    fn write_array_end(&mut self) -> Result<()> {
        let prefix_position = self.open_arrays.pop().ok_or_else(|| {
            CodecError::MalformedStream("array end without a matching array start".to_string())
        })?;
        self.write_tag(ElementTag::ArrayEnd)?;

        let end_position = self.writer.stream_position()?;
        let body_length = end_position - prefix_position - LENGTH_PREFIX_BYTES;
        let body_length = u32::try_from(body_length).map_err(|_| CodecError::Overflow)?;

        self.writer.seek(SeekFrom::Start(prefix_position))?;
        self.writer.write_u32::<LittleEndian>(body_length)?;
        self.writer.seek(SeekFrom::Start(end_position))?;
        Ok(())
    }

    fn write_coordinates(&mut self, coords: &Coordinates) -> Result<()> {
        self.write_tag(ElementTag::Coordinates)?;
        let values = coords.as_slice();
        // Arity is always 2 or 3
        self.writer.write_u8(values.len() as u8)?;
        for value in values {
            self.writer.write_f64::<LittleEndian>(*value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn empty_array_bytes() {
        let mut writer = BinaryWriter::new(Cursor::new(Vec::new()));
        writer.write_array_start().unwrap();
        writer.write_array_end().unwrap();
        let buf = writer.finish().unwrap().into_inner();

        // tag, u32 length covering only the end tag, end tag
        assert_eq!(buf, vec![0x04, 1, 0, 0, 0, 0x00]);
    }

    #[test]
    fn nested_length_prefixes() {
        let mut writer = BinaryWriter::new(Cursor::new(Vec::new()));
        writer.write_array_start().unwrap();
        writer.write_array_start().unwrap();
        writer.write_coordinates(&Coordinates::xy(1., 2.)).unwrap();
        writer.write_array_end().unwrap();
        writer.write_array_end().unwrap();
        let buf = writer.finish().unwrap().into_inner();

        // inner body: coordinates (1 + 1 + 16) + end tag (1)
        let inner_len = 1 + 1 + 16 + 1;
        // outer body: inner tag + prefix + inner body + end tag
        let outer_len = 1 + 4 + inner_len + 1;
        assert_eq!(buf.len(), 1 + 4 + outer_len);
        assert_eq!(&buf[1..5], &(outer_len as u32).to_le_bytes());
        assert_eq!(&buf[6..10], &(inner_len as u32).to_le_bytes());
        assert_eq!(buf[10], 0x01);
        assert_eq!(buf[11], 2);
    }

    #[test]
    fn null_is_single_byte() {
        let mut writer = BinaryWriter::new(Cursor::new(Vec::new()));
        writer.write_null().unwrap();
        assert_eq!(writer.finish().unwrap().into_inner(), vec![0x0A]);
    }

    #[test]
    fn finish_with_open_array() {
        let mut writer = BinaryWriter::new(Cursor::new(Vec::new()));
        writer.write_array_start().unwrap();
        assert_eq!(writer.depth(), 1);
        assert!(matches!(
            writer.finish().unwrap_err(),
            CodecError::MalformedStream(_)
        ));
    }

    #[test]
    fn unbalanced_array_end() {
        let mut writer = BinaryWriter::new(Cursor::new(Vec::new()));
        assert!(matches!(
            writer.write_array_end().unwrap_err(),
            CodecError::MalformedStream(_)
        ));
    }
}

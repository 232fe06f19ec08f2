use std::io::{Read, Seek, SeekFrom};

use byteorder::{ByteOrder, LittleEndian};
use kardia_types::{AtcError, AtcResult, BlockTag, BLOCK_TAG_LEN};

use crate::BLOCK_HEADER_LEN;

/// Верхняя граница предварительного резервирования буфера в `read_exact`
/// (длина приходит из файла и может быть повреждена).
const READ_PREALLOC_LIMIT: usize = 64 * 1024;

/// Последовательный курсор поверх позиционируемого источника байт.
///
/// Владеет источником до [`BinaryAccessor::into_inner`]. Все чтения строятся на
/// единственном примитиве [`BinaryAccessor::read_exact`], который возвращает
/// [`AtcError::TruncatedRead`], если до конца данных осталось меньше байт,
/// чем запрошено.
#[derive(Debug)]
pub struct BinaryAccessor<R> {
    inner: R,
}

impl<R: Read + Seek> BinaryAccessor<R> {
    /// Оборачивает источник, проверяя, что он поддерживает позиционирование.
    pub fn new(mut inner: R) -> AtcResult<Self> {
        inner
            .stream_position()
            .map_err(AtcError::UnseekableSource)?;

        Ok(Self { inner })
    }

    /// Текущее абсолютное смещение курсора.
    pub fn position(&mut self) -> AtcResult<u64> {
        Ok(self.inner.stream_position()?)
    }

    /// Читает ровно `n` байт.
    pub fn read_exact(
        &mut self,
        n: usize,
    ) -> AtcResult<Vec<u8>> {
        let offset = self.position()?;
        let mut buf = Vec::with_capacity(n.min(READ_PREALLOC_LIMIT));
        let got = (&mut self.inner).take(n as u64).read_to_end(&mut buf)?;

        if got < n {
            return Err(AtcError::truncated(offset, n, got));
        }

        Ok(buf)
    }

    /// Читает ровно `N` байт в массив фиксированного размера.
    pub fn read_array<const N: usize>(&mut self) -> AtcResult<[u8; N]> {
        let buf = self.read_exact(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&buf);

        Ok(out)
    }

    /// Перемещает курсор на абсолютное смещение от начала источника.
    ///
    /// Границы не проверяются: последующее чтение за концом данных вернёт
    /// [`AtcError::TruncatedRead`].
    pub fn seek_absolute(
        &mut self,
        offset: u64,
    ) -> AtcResult<u64> {
        Ok(self.inner.seek(SeekFrom::Start(offset))?)
    }

    /// Сдвигает курсор относительно текущей позиции (`delta` может быть
    /// отрицательным).
    pub fn seek_relative(
        &mut self,
        delta: i64,
    ) -> AtcResult<u64> {
        Ok(self.inner.seek(SeekFrom::Current(delta))?)
    }

    pub fn read_u16_le(&mut self) -> AtcResult<u16> {
        let b = self.read_array::<2>()?;
        Ok(LittleEndian::read_u16(&b))
    }

    pub fn read_u32_le(&mut self) -> AtcResult<u32> {
        let b = self.read_array::<4>()?;
        Ok(LittleEndian::read_u32(&b))
    }

    /// Читает заголовок блока (4-байтовый тег + u32 длина) одним 8-байтовым
    /// чтением.
    pub fn read_tag_and_length(&mut self) -> AtcResult<(BlockTag, u32)> {
        let b = self.read_array::<BLOCK_HEADER_LEN>()?;

        let mut tag = [0u8; BLOCK_TAG_LEN];
        tag.copy_from_slice(&b[..BLOCK_TAG_LEN]);
        let length = LittleEndian::read_u32(&b[BLOCK_TAG_LEN..]);

        Ok((BlockTag::new(tag), length))
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Возвращает источник. Аксессор никогда не закрывает его сам.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use super::*;

    /// Источник, который читается, но не позиционируется (как pipe).
    struct PipeLike;

    impl Read for PipeLike {
        fn read(
            &mut self,
            _buf: &mut [u8],
        ) -> io::Result<usize> {
            Ok(0)
        }
    }

    impl Seek for PipeLike {
        fn seek(
            &mut self,
            _pos: SeekFrom,
        ) -> io::Result<u64> {
            Err(io::Error::new(io::ErrorKind::Unsupported, "illegal seek"))
        }
    }

    fn accessor(bytes: &[u8]) -> BinaryAccessor<Cursor<Vec<u8>>> {
        BinaryAccessor::new(Cursor::new(bytes.to_vec())).unwrap()
    }

    #[test]
    fn test_unseekable_source_rejected() {
        let result = BinaryAccessor::new(PipeLike);
        assert!(matches!(result, Err(AtcError::UnseekableSource(_))));
    }

    #[test]
    fn test_read_exact_and_position() {
        let mut acc = accessor(&[1, 2, 3, 4, 5]);

        assert_eq!(acc.read_exact(3).unwrap(), vec![1, 2, 3]);
        assert_eq!(acc.position().unwrap(), 3);
        assert_eq!(acc.read_exact(0).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_read_exact_truncated() {
        let mut acc = accessor(&[1, 2, 3]);
        acc.seek_absolute(1).unwrap();

        match acc.read_exact(4) {
            Err(AtcError::TruncatedRead {
                offset,
                requested,
                available,
            }) => {
                assert_eq!(offset, 1);
                assert_eq!(requested, 4);
                assert_eq!(available, 2);
            }
            other => panic!("expected TruncatedRead, got {other:?}"),
        }
    }

    #[test]
    fn test_huge_request_does_not_preallocate() {
        let mut acc = accessor(&[0u8; 16]);
        let err = acc.read_exact(u32::MAX as usize).unwrap_err();
        assert!(err.is_truncated());
    }

    #[test]
    fn test_seek_past_end_then_read_fails() {
        let mut acc = accessor(&[0u8; 4]);

        assert_eq!(acc.seek_absolute(100).unwrap(), 100);
        assert!(acc.read_exact(1).unwrap_err().is_truncated());
    }

    #[test]
    fn test_seek_relative_both_directions() {
        let mut acc = accessor(&[10, 20, 30, 40]);

        acc.seek_relative(3).unwrap();
        assert_eq!(acc.read_exact(1).unwrap(), vec![40]);

        acc.seek_relative(-3).unwrap();
        assert_eq!(acc.read_exact(1).unwrap(), vec![20]);
    }

    #[test]
    fn test_seek_relative_before_start_is_io_error() {
        let mut acc = accessor(&[0u8; 4]);
        assert!(matches!(acc.seek_relative(-1), Err(AtcError::Io(_))));
    }

    #[test]
    fn test_little_endian_fields() {
        let mut acc = accessor(&[0x90, 0x01, 0x78, 0x56, 0x34, 0x12]);

        assert_eq!(acc.read_u16_le().unwrap(), 0x0190);
        assert_eq!(acc.read_u32_le().unwrap(), 0x1234_5678);
        assert!(acc.read_u16_le().unwrap_err().is_truncated());
    }

    #[test]
    fn test_read_tag_and_length() {
        let mut acc = accessor(b"ecg2\x06\x00\x00\x00rest");

        let (tag, len) = acc.read_tag_and_length().unwrap();
        assert_eq!(tag, BlockTag::ECG2);
        assert_eq!(len, 6);
        assert_eq!(acc.position().unwrap(), 8);
    }

    #[test]
    fn test_read_tag_and_length_partial_header() {
        // 7 байт: заголовок блока неполный
        let mut acc = accessor(b"fmt \x04\x00\x00");
        assert!(acc.read_tag_and_length().unwrap_err().is_truncated());
    }

    #[test]
    fn test_into_inner_returns_source() {
        let acc = accessor(&[1, 2]);
        assert_eq!(acc.get_ref().get_ref(), &vec![1, 2]);
        assert_eq!(acc.into_inner().into_inner(), vec![1, 2]);
    }
}

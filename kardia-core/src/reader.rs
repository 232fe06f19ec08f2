use std::{
    fs::File,
    io::{Read, Seek},
    path::Path,
};

use byteorder::{ByteOrder, LittleEndian};
use kardia_types::{
    AtcError, AtcResult, BlockEntry, BlockIndex, BlockTag, LeadId, Recording,
};
use log::{debug, trace};

use crate::{
    binary::BinaryAccessor,
    format::{
        BLOCK_CHECKSUM_LEN, BLOCK_HEADER_LEN, FILE_MAGIC, FIRST_BLOCK_OFFSET,
        FMT_SAMPLE_RATE_OFFSET, HEADER_REGION_LEN, LEAD_SAMPLE_SIZE,
    },
};

/// Читатель контейнера ALIVE (.atc) с произвольным доступом к блокам.
///
/// При создании проверяет магическую строку и один раз сканирует блоки,
/// строя индекс тег → (смещение полезной нагрузки, длина). Аксессоры
/// позиционируются по индексу и декодируют данные при каждом вызове, без
/// кэширования.
///
/// Курсор источника общий для всех операций, поэтому методы чтения требуют
/// `&mut self`.
#[derive(Debug)]
pub struct AtcReader<R> {
    accessor: BinaryAccessor<R>,
    index: BlockIndex,
}

impl AtcReader<File> {
    /// Открывает файл контейнера по пути.
    pub fn open<P: AsRef<Path>>(path: P) -> AtcResult<Self> {
        let file = File::open(path)?;
        Self::new(file)
    }
}

impl<R: Read + Seek> AtcReader<R> {
    /// Создаёт читатель: проверка заголовка, затем построение индекса.
    pub fn new(source: R) -> AtcResult<Self> {
        let mut accessor = BinaryAccessor::new(source)?;

        check_header(&mut accessor)?;
        let index = scan_blocks(&mut accessor)?;

        Ok(Self { accessor, index })
    }

    /// Снимок индекса блоков (копия, не живое представление).
    pub fn block_index(&self) -> BlockIndex {
        self.index.clone()
    }

    pub fn contains_block(
        &self,
        tag: &BlockTag,
    ) -> bool {
        self.index.contains(tag)
    }

    /// Отведения, для которых в контейнере есть блок.
    pub fn available_leads(&self) -> Vec<LeadId> {
        LeadId::all()
            .filter(|lead| self.index.contains(&lead.tag()))
            .collect()
    }

    /// Непрозрачные 7 байт между магической строкой и первым блоком.
    pub fn header_region(&mut self) -> AtcResult<[u8; HEADER_REGION_LEN]> {
        self.accessor.seek_absolute(FILE_MAGIC.len() as u64)?;
        self.accessor.read_array::<HEADER_REGION_LEN>()
    }

    /// Частота дискретизации (Гц) из блока `fmt `.
    pub fn read_sample_rate(&mut self) -> AtcResult<u16> {
        let entry = self.seek_to_block(&BlockTag::FMT)?;
        let field_end = FMT_SAMPLE_RATE_OFFSET + 2;

        if entry.length < field_end {
            return Err(AtcError::truncated(
                entry.offset + FMT_SAMPLE_RATE_OFFSET as u64,
                2,
                entry.length.saturating_sub(FMT_SAMPLE_RATE_OFFSET) as usize,
            ));
        }

        self.accessor
            .seek_relative(FMT_SAMPLE_RATE_OFFSET as i64)?;
        self.accessor.read_u16_le()
    }

    /// Сырые выборки отведения `lead_id` (1..=6).
    pub fn read_lead(
        &mut self,
        lead_id: u8,
    ) -> AtcResult<Vec<i16>> {
        let lead = LeadId::new(lead_id)?;
        self.read_lead_samples(lead)
    }

    /// Сырые выборки отведения: полезная нагрузка блока как последовательность
    /// little-endian i16.
    ///
    /// Нечётная длина полезной нагрузки — [`AtcError::MalformedPayload`].
    pub fn read_lead_samples(
        &mut self,
        lead: LeadId,
    ) -> AtcResult<Vec<i16>> {
        let tag = lead.tag();
        let entry = self.seek_to_block(&tag)?;

        if entry.length as usize % LEAD_SAMPLE_SIZE != 0 {
            return Err(AtcError::MalformedPayload {
                tag,
                length: entry.length,
            });
        }

        let bytes = self.accessor.read_exact(entry.length as usize)?;
        let mut samples = vec![0i16; bytes.len() / LEAD_SAMPLE_SIZE];
        LittleEndian::read_i16_into(&bytes, &mut samples);

        Ok(samples)
    }

    /// Полезная нагрузка произвольного блока без интерпретации.
    pub fn read_block(
        &mut self,
        tag: &BlockTag,
    ) -> AtcResult<Vec<u8>> {
        let entry = self.seek_to_block(tag)?;
        self.accessor.read_exact(entry.length as usize)
    }

    /// Сохранённая контрольная сумма блока (little-endian u32).
    ///
    /// Значение возвращается как есть и не проверяется.
    pub fn read_block_checksum(
        &mut self,
        tag: &BlockTag,
    ) -> AtcResult<u32> {
        let entry = self.lookup(tag)?;
        self.accessor.seek_absolute(entry.end())?;
        self.accessor.read_u32_le()
    }

    /// Частота дискретизации и все присутствующие отведения.
    pub fn read_recording(&mut self) -> AtcResult<Recording> {
        let mut recording = Recording::new(self.read_sample_rate()?);

        for lead in self.available_leads() {
            let samples = self.read_lead_samples(lead)?;
            recording.leads.insert(lead, samples);
        }

        Ok(recording)
    }

    /// Возвращает источник. Читатель никогда не закрывает его сам.
    pub fn into_inner(self) -> R {
        self.accessor.into_inner()
    }

    fn lookup(
        &self,
        tag: &BlockTag,
    ) -> AtcResult<BlockEntry> {
        self.index
            .get(tag)
            .copied()
            .ok_or(AtcError::UnknownBlock(*tag))
    }

    /// Позиционирует курсор на начало полезной нагрузки блока.
    fn seek_to_block(
        &mut self,
        tag: &BlockTag,
    ) -> AtcResult<BlockEntry> {
        let entry = self.lookup(tag)?;
        self.accessor.seek_absolute(entry.offset)?;

        Ok(entry)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Заголовок и сканирование блоков
////////////////////////////////////////////////////////////////////////////////

fn check_header<R: Read + Seek>(accessor: &mut BinaryAccessor<R>) -> AtcResult<()> {
    accessor.seek_absolute(0)?;

    let magic = match accessor.read_array::<{ FILE_MAGIC.len() }>() {
        Ok(m) => m,
        Err(AtcError::TruncatedRead { available, .. }) => {
            return Err(AtcError::invalid_header(format!(
                "source too short for magic string ({available} of {} bytes)",
                FILE_MAGIC.len()
            )));
        }
        Err(e) => return Err(e),
    };

    if magic != FILE_MAGIC {
        return Err(AtcError::invalid_header(format!(
            "expected {:02x?}, found {:02x?}",
            FILE_MAGIC, magic
        )));
    }

    Ok(())
}

/// Однократный проход по блокам от [`FIRST_BLOCK_OFFSET`].
///
/// Конец контейнера — единственный случай, когда `TruncatedRead` не является
/// ошибкой: неполный заголовок очередного блока завершает скан. Полезная
/// нагрузка и контрольная сумма не читаются, курсор сдвигается на
/// `length + 4`. Повторный тег заменяет предыдущую запись.
fn scan_blocks<R: Read + Seek>(accessor: &mut BinaryAccessor<R>) -> AtcResult<BlockIndex> {
    let mut index = BlockIndex::new();

    accessor.seek_absolute(FIRST_BLOCK_OFFSET)?;

    loop {
        let header_offset = accessor.position()?;

        let (tag, length) = match accessor.read_tag_and_length() {
            Ok(h) => h,
            Err(e) if e.is_truncated() => {
                debug!(
                    "Block scan finished at offset {header_offset}: {} block(s)",
                    index.len()
                );
                break;
            }
            Err(e) => return Err(e),
        };

        let entry = BlockEntry::new(header_offset + BLOCK_HEADER_LEN as u64, length);
        trace!(
            "Block {tag} at {header_offset:#x}: payload {} bytes at {:#x}",
            length,
            entry.offset
        );

        if let Some(prev) = index.insert(tag, entry) {
            debug!(
                "Block {tag} at {:#x} replaces earlier one at {:#x}",
                entry.offset, prev.offset
            );
        }

        accessor.seek_relative(length as i64 + BLOCK_CHECKSUM_LEN as i64)?;
    }

    Ok(index)
}

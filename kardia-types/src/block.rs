use std::collections::BTreeMap;

use serde::Serialize;

use crate::BlockTag;

/// Положение полезной нагрузки блока в контейнере.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockEntry {
    /// Абсолютное смещение полезной нагрузки (сразу после 8-байтового
    /// заголовка тег+длина)
    pub offset: u64,
    /// Длина полезной нагрузки в байтах, без 4-байтовой контрольной суммы
    pub length: u32,
}

/// Индекс блоков: тег → положение полезной нагрузки.
///
/// Каждый тег встречается не более одного раза. Если контейнер содержит
/// несколько блоков с одним тегом, в индексе остаётся последний
/// (см. [`BlockIndex::insert`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BlockIndex {
    entries: BTreeMap<BlockTag, BlockEntry>,
}

impl BlockEntry {
    pub fn new(
        offset: u64,
        length: u32,
    ) -> Self {
        BlockEntry { offset, length }
    }

    /// Смещение первого байта после полезной нагрузки (начало контрольной
    /// суммы).
    pub fn end(&self) -> u64 {
        self.offset + self.length as u64
    }
}

impl BlockIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавляет запись, заменяя предыдущую с тем же тегом (last-wins).
    ///
    /// Возвращает вытесненную запись, если она была.
    pub fn insert(
        &mut self,
        tag: BlockTag,
        entry: BlockEntry,
    ) -> Option<BlockEntry> {
        self.entries.insert(tag, entry)
    }

    pub fn get(
        &self,
        tag: &BlockTag,
    ) -> Option<&BlockEntry> {
        self.entries.get(tag)
    }

    pub fn contains(
        &self,
        tag: &BlockTag,
    ) -> bool {
        self.entries.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Записи в порядке возрастания тегов.
    pub fn iter(&self) -> impl Iterator<Item = (&BlockTag, &BlockEntry)> {
        self.entries.iter()
    }

    pub fn tags(&self) -> impl Iterator<Item = &BlockTag> {
        self.entries.keys()
    }
}

impl<'a> IntoIterator for &'a BlockIndex {
    type Item = (&'a BlockTag, &'a BlockEntry);
    type IntoIter = std::collections::btree_map::Iter<'a, BlockTag, BlockEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

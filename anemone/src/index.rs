/******************************************************************************
 *                                                                            *
 * Maps between physical slots and logical indices. Forward generation walks *
 * one page of a template and assigns every slot its logical index; reverse  *
 * lookup turns a raw slot from an interaction back into the same index.     *
 *                                                                            *
 ******************************************************************************/

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::template::{Cells, Template};

/// The stable identity of one rendered slot.
///
/// `occurrence` counts this symbol's occurrences on this and all earlier
/// pages, so it can be used directly as an index into application data.
/// `total` is `capacity * page + slot`.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LogicalIndex {
    symbol: char,
    page: i32,
    slot: usize,
    page_occurrence: usize,
    occurrence: i64,
    total: i64,
}

impl LogicalIndex {
    pub fn symbol(&self) -> char {
        self.symbol
    }

    pub fn page(&self) -> i32 {
        self.page
    }

    /// Physical slot this index was computed for.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Occurrences of the symbol before this slot on the current page only.
    /// This is the page-local character index; it is the same for a slot on
    /// every page, while `occurrence` adds `count_of(symbol) * page`.
    pub fn page_occurrence(&self) -> usize {
        self.page_occurrence
    }

    pub fn occurrence(&self) -> i64 {
        self.occurrence
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    /// `occurrence` as an index into a slice, if it is not negative.
    pub fn occurrence_index(&self) -> Option<usize> {
        usize::try_from(self.occurrence).ok()
    }
}

/// Resolves logical indices for one template.
///
/// Holds the per-symbol page capacities so each lookup is a single scan.
#[derive(Debug, Clone)]
pub struct IndexResolver<'t> {
    template: &'t Template,
    capacity: usize,
    per_page: HashMap<char, usize>,
}

impl<'t> IndexResolver<'t> {
    pub fn new(template: &'t Template) -> Self {
        let mut per_page = HashMap::new();
        for (_, symbol) in template.cells() {
            *per_page.entry(symbol).or_insert(0) += 1;
        }
        IndexResolver {
            template,
            capacity: template.capacity(),
            per_page,
        }
    }

    pub fn template(&self) -> &'t Template {
        self.template
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// How many occurrences of `symbol` one page holds.
    pub fn per_page(&self, symbol: char) -> usize {
        self.per_page.get(&symbol).copied().unwrap_or(0)
    }

    /// Forward generation: the logical index of every symbol slot on `page`,
    /// in slot order.
    pub fn page(&self, page: i32) -> PageIndices<'_, 't> {
        PageIndices {
            resolver: self,
            cells: self.template.cells(),
            page,
            seen: HashMap::new(),
        }
    }

    /// Reverse lookup of a raw interaction slot on `page`.
    ///
    /// Returns `None` for negative slots, slots outside the template and
    /// slots past the end of a ragged row.
    pub fn resolve(&self, page: i32, raw_slot: i32) -> Option<LogicalIndex> {
        let slot = usize::try_from(raw_slot).ok()?;
        if slot >= self.capacity {
            return None;
        }
        let symbol = self.template.symbol_at(slot)?;
        let page_occurrence = self.template.occurrences_before(slot, symbol);
        Some(self.index(symbol, page, slot, page_occurrence))
    }

    /// The page and physical slot that display the `occurrence`-th global
    /// occurrence of `symbol`. `None` if the symbol is not in the template.
    pub fn locate(&self, symbol: char, occurrence: i64) -> Option<(i32, usize)> {
        let per_page = i64::try_from(self.per_page(symbol)).ok().filter(|&n| n > 0)?;
        let page = i32::try_from(occurrence.div_euclid(per_page)).ok()?;
        let nth = usize::try_from(occurrence.rem_euclid(per_page)).ok()?;
        self.template
            .cells()
            .filter(|&(_, c)| c == symbol)
            .nth(nth)
            .map(|(slot, _)| (page, slot))
    }

    fn index(&self, symbol: char, page: i32, slot: usize, page_occurrence: usize) -> LogicalIndex {
        let per_page = self.per_page(symbol) as i64;
        LogicalIndex {
            symbol,
            page,
            slot,
            page_occurrence,
            occurrence: per_page * i64::from(page) + page_occurrence as i64,
            total: self.capacity as i64 * i64::from(page) + slot as i64,
        }
    }
}

/// Iterator returned by [`IndexResolver::page`].
#[derive(Debug, Clone)]
pub struct PageIndices<'r, 't> {
    resolver: &'r IndexResolver<'t>,
    cells: Cells<'t>,
    page: i32,
    seen: HashMap<char, usize>,
}

impl Iterator for PageIndices<'_, '_> {
    type Item = LogicalIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let (slot, symbol) = self.cells.next()?;
        let running = self.seen.entry(symbol).or_insert(0);
        let page_occurrence = *running;
        *running += 1;
        Some(self.resolver.index(symbol, self.page, slot, page_occurrence))
    }
}

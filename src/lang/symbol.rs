use super::Error;
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Constant,
    Variable,
    Procedure,
}

/// ## Symbol record
///
/// `value` is only meaningful for constants; `address` is the frame slot of
/// a variable or the code index of a procedure.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub kind: Kind,
    pub name: String,
    pub value: i32,
    pub level: usize,
    pub address: usize,
}

impl Symbol {
    fn new(name: &str, kind: Kind, level: usize) -> Symbol {
        Symbol {
            kind,
            name: name.to_string(),
            value: 0,
            level,
            address: 0,
        }
    }

    /// Constants are substituted by value so they match at any level.
    fn matches(&self, name: &str, level: usize) -> bool {
        self.name == name && (self.kind == Kind::Constant || self.level == level)
    }
}

#[derive(Debug, Clone)]
enum Slot {
    Empty,
    Removed,
    Used(Symbol),
}

/// Fixed capacity open addressed table keyed by name. Knows nothing about
/// scope shadowing; it only finds the slot for one `(name, level)` pair.
#[derive(Debug)]
struct SymbolMap {
    slots: Vec<Slot>,
}

impl SymbolMap {
    fn new(capacity: usize) -> SymbolMap {
        SymbolMap {
            slots: vec![Slot::Empty; capacity],
        }
    }

    fn hash(&self, name: &str) -> usize {
        let mut hash: u32 = 0x811c_9dc5;
        for byte in name.bytes() {
            hash ^= byte as u32;
            hash = hash.wrapping_mul(0x0100_0193);
        }
        hash as usize % self.slots.len()
    }

    /// Linear probe sequence, visiting every slot at most once.
    fn probe(&self, name: &str) -> impl Iterator<Item = usize> {
        let len = self.slots.len();
        let start = if len == 0 { 0 } else { self.hash(name) };
        (0..len).map(move |i| (start + i) % len)
    }

    fn find(&self, name: &str, level: usize) -> Option<usize> {
        for index in self.probe(name) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Removed => continue,
                Slot::Used(sym) => {
                    if sym.matches(name, level) {
                        return Some(index);
                    }
                }
            }
        }
        None
    }

    fn vacancy(&self, name: &str) -> Option<usize> {
        self.probe(name)
            .find(|index| !matches!(self.slots[*index], Slot::Used(_)))
    }

    fn get(&self, index: usize) -> Option<&Symbol> {
        match self.slots.get(index) {
            Some(Slot::Used(sym)) => Some(sym),
            _ => None,
        }
    }

    fn insert(&mut self, index: usize, sym: Symbol) -> &mut Symbol {
        self.slots[index] = Slot::Used(sym);
        match &mut self.slots[index] {
            Slot::Used(sym) => sym,
            _ => unreachable!(),
        }
    }

    fn remove_level(&mut self, level: usize) -> usize {
        let mut count = 0;
        for slot in self.slots.iter_mut() {
            if let Slot::Used(sym) = slot {
                if sym.level == level {
                    trace!(name = %sym.name, level, "symbol removed");
                    *slot = Slot::Removed;
                    count += 1;
                }
            }
        }
        count
    }

    fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Used(_)))
            .count()
    }
}

/// ## Symbol directory
///
/// Scope aware view over a [`SymbolMap`]. Resolution tries the current
/// level first and works outward to level 0.
#[derive(Debug)]
pub struct SymbolTable {
    map: SymbolMap,
    level: usize,
    max_level: usize,
}

impl SymbolTable {
    pub fn new(capacity: usize, max_level: usize) -> SymbolTable {
        SymbolTable {
            map: SymbolMap::new(capacity),
            level: 0,
            max_level,
        }
    }

    /// Current lexical nesting depth.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn declare(&mut self, name: &str, kind: Kind, level: usize) -> Result<&mut Symbol> {
        if self.map.find(name, level).is_some() {
            return Err(match kind {
                Kind::Constant => error!(RedefineConstant; name),
                Kind::Variable | Kind::Procedure => error!(CannotReuse; name),
            });
        }
        let index = match self.map.vacancy(name) {
            Some(index) => index,
            None => return Err(error!(SymbolTableFull; name)),
        };
        debug!(name, ?kind, level, index, "symbol declared");
        Ok(self.map.insert(index, Symbol::new(name, kind, level)))
    }

    pub fn resolve(&self, name: &str, level: usize) -> Option<&Symbol> {
        (0..=level)
            .rev()
            .find_map(|lvl| self.map.find(name, lvl))
            .and_then(|index| self.map.get(index))
    }

    pub fn open_scope(&mut self) -> Result<usize> {
        if self.level >= self.max_level {
            return Err(error!(NestingTooDeep));
        }
        self.level += 1;
        Ok(self.level)
    }

    /// Forgets every symbol declared at the current level and steps out
    /// to the enclosing one.
    pub fn close_scope(&mut self) {
        let removed = self.map.remove_level(self.level);
        debug!(level = self.level, removed, "scope closed");
        self.level = self.level.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_wraps_and_terminates() {
        let mut map = SymbolMap::new(3);
        for (i, name) in ["a", "b", "c"].iter().enumerate() {
            let index = map.vacancy(name).unwrap();
            map.insert(index, Symbol::new(name, Kind::Variable, i));
        }
        assert_eq!(map.vacancy("d"), None);
        assert_eq!(map.find("d", 0), None);
        assert!(map.find("c", 2).is_some());
        assert_eq!(map.find("c", 0), None);
    }

    #[test]
    fn test_removed_slots_do_not_break_probe() {
        let mut map = SymbolMap::new(1);
        let index = map.vacancy("x").unwrap();
        map.insert(index, Symbol::new("x", Kind::Variable, 1));
        assert_eq!(map.remove_level(1), 1);
        assert_eq!(map.find("x", 1), None);
        assert_eq!(map.vacancy("y"), Some(0));
    }

    #[test]
    fn test_shadowing() {
        let mut table = SymbolTable::new(100, 10);
        table.declare("x", Kind::Variable, 0).unwrap().address = 3;
        let level = table.open_scope().unwrap();
        table.declare("x", Kind::Variable, level).unwrap().address = 4;
        assert_eq!(table.resolve("x", level).unwrap().level, 1);
        assert_eq!(table.resolve("x", 0).unwrap().address, 3);
        table.close_scope();
        assert_eq!(table.level(), 0);
        assert_eq!(table.resolve("x", 0).unwrap().address, 3);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_redeclaration() {
        let mut table = SymbolTable::new(100, 10);
        table.declare("c", Kind::Constant, 0).unwrap().value = 1;
        assert_eq!(table.declare("c", Kind::Constant, 0).unwrap_err().code(), 29);
        table.declare("v", Kind::Variable, 0).unwrap();
        assert_eq!(table.declare("v", Kind::Variable, 0).unwrap_err().code(), 28);
        assert_eq!(table.declare("v", Kind::Procedure, 0).unwrap_err().code(), 28);
        let level = table.open_scope().unwrap();
        assert_eq!(table.declare("c", Kind::Variable, level).unwrap_err().code(), 28);
        assert!(table.declare("v", Kind::Variable, level).is_ok());
    }

    #[test]
    fn test_constant_resolves_from_inner_level() {
        let mut table = SymbolTable::new(100, 10);
        table.declare("k", Kind::Constant, 0).unwrap().value = 7;
        table.open_scope().unwrap();
        table.open_scope().unwrap();
        assert_eq!(table.resolve("k", 2).unwrap().value, 7);
    }

    #[test]
    fn test_table_full_and_nesting() {
        let mut table = SymbolTable::new(2, 1);
        table.declare("a", Kind::Variable, 0).unwrap();
        table.declare("b", Kind::Variable, 0).unwrap();
        assert_eq!(table.declare("c", Kind::Variable, 0).unwrap_err().code(), 32);
        assert_eq!(table.open_scope().unwrap(), 1);
        assert_eq!(table.open_scope().unwrap_err().code(), 33);
    }
}

use std::collections::HashMap;

use oeuf_geom::Vec2;

/// Index into a [`UvPatternTable`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct UvPatternId(pub u16);

#[derive(Clone, Debug)]
pub struct UvPattern {
    pub name: String,
    pub uvs: Vec<Vec2>,
}

/// Named per-corner UV lists, resolved to integer ids once at build time.
#[derive(Default, Clone, Debug)]
pub struct UvPatternTable {
    pub patterns: Vec<UvPattern>,
    pub by_name: HashMap<String, UvPatternId>,
}

impl UvPatternTable {
    pub fn new() -> Self {
        Self {
            patterns: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Builds the table from a name→UV mapping.
    pub fn from_map(map: &HashMap<String, Vec<[f32; 2]>>) -> Self {
        let mut entries: Vec<(&String, &Vec<[f32; 2]>)> = map.iter().collect();
        // HashMap iteration order is nondeterministic; sort so ids are stable across reparses.
        entries.sort_by(|a, b| a.0.cmp(b.0));
        let mut table = UvPatternTable::new();
        for (name, uvs) in entries {
            let id = UvPatternId(table.patterns.len() as u16);
            table.by_name.insert(name.clone(), id);
            table.patterns.push(UvPattern {
                name: name.clone(),
                uvs: uvs.iter().copied().map(Vec2::from).collect(),
            });
        }
        table
    }

    #[inline]
    pub fn id_of(&self, name: &str) -> Option<UvPatternId> {
        self.by_name.get(name).copied()
    }

    #[inline]
    pub fn get(&self, id: UvPatternId) -> Option<&[Vec2]> {
        self.patterns.get(id.0 as usize).map(|p| p.uvs.as_slice())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

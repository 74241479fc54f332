//! Static catalogue of effects, grouped by category.

use crate::core::host::Renderer;
use fnv::FnvHashMap;
use smallvec::SmallVec;
use thiserror::Error;

/// Builds a fresh renderer; the argument seeds its randomness.
pub type RendererFactory = fn(u64) -> Box<dyn Renderer>;

#[derive(Clone, Copy)]
pub struct EffectDescriptor {
    pub name: &'static str,
    pub category: &'static str,
    pub factory: RendererFactory,
    /// Idle until the pointer is over the canvas.
    pub hover_gated: bool,
    /// Whether the renderer scales its time step by the governor's speed.
    pub follows_speed: bool,
}

impl std::fmt::Debug for EffectDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectDescriptor")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("hover_gated", &self.hover_gated)
            .field("follows_speed", &self.follows_speed)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct Category {
    pub name: &'static str,
    pub effects: SmallVec<[&'static str; 8]>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("registry needs at least one effect")]
    Empty,
    #[error("duplicate effect name `{0}`")]
    DuplicateName(&'static str),
}

#[derive(Debug)]
pub struct Registry {
    descriptors: Vec<EffectDescriptor>,
    by_name: FnvHashMap<&'static str, usize>,
    categories: Vec<Category>,
}

impl Registry {
    /// The first descriptor is the designated fallback for unknown names.
    pub fn new(descriptors: Vec<EffectDescriptor>) -> Result<Self, RegistryError> {
        if descriptors.is_empty() {
            return Err(RegistryError::Empty);
        }
        let mut by_name = FnvHashMap::default();
        let mut categories: Vec<Category> = Vec::new();
        for (i, d) in descriptors.iter().enumerate() {
            if by_name.insert(d.name, i).is_some() {
                return Err(RegistryError::DuplicateName(d.name));
            }
            match categories.iter_mut().find(|c| c.name == d.category) {
                Some(c) => c.effects.push(d.name),
                None => categories.push(Category {
                    name: d.category,
                    effects: SmallVec::from_slice(&[d.name]),
                }),
            }
        }
        Ok(Self {
            descriptors,
            by_name,
            categories,
        })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn descriptors(&self) -> &[EffectDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn default_effect(&self) -> &EffectDescriptor {
        &self.descriptors[0]
    }

    pub fn find(&self, name: &str) -> Option<&EffectDescriptor> {
        self.index_of(name).map(|i| &self.descriptors[i])
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Never fails: unknown names resolve to the default effect.
    pub fn resolve(&self, name: &str) -> &EffectDescriptor {
        match self.find(name) {
            Some(d) => d,
            None => {
                log::warn!(
                    "[registry] unknown effect `{}`, falling back to `{}`",
                    name,
                    self.default_effect().name
                );
                self.default_effect()
            }
        }
    }

    /// Next effect in declaration order, wrapping; unknown names start over.
    pub fn next_after(&self, name: &str) -> &EffectDescriptor {
        let i = self.index_of(name).map(|i| i + 1).unwrap_or(0);
        &self.descriptors[i % self.descriptors.len()]
    }

    pub fn prev_before(&self, name: &str) -> &EffectDescriptor {
        let n = self.descriptors.len();
        let i = self.index_of(name).map(|i| i + n - 1).unwrap_or(0);
        &self.descriptors[i % n]
    }
}

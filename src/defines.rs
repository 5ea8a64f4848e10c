//! Shader Macro Definitions
//!
//! An ordered collection of preprocessor defines handed to the stage-1
//! compiler. Internally uses a sorted `Vec<(String, String)>` so that
//! identical define sets always render identical command lines — job
//! expansion must be deterministic for artifact ordering to be stable.

/// A collection of shader macro definitions.
///
/// Insertion keeps the set sorted by key; rendering the same set twice
/// always produces the same flag sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderDefines {
    defines: Vec<(String, String)>,
}

impl ShaderDefines {
    /// Create empty shader defines collection
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            defines: Vec::new(),
        }
    }

    /// Set shader define (maintains sorted order)
    ///
    /// If key exists, updates its value; otherwise inserts new entry.
    pub fn set(&mut self, key: &str, value: &str) {
        match self
            .defines
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
        {
            Ok(idx) => {
                self.defines[idx].1 = value.to_string();
            }
            Err(idx) => {
                self.defines.insert(idx, (key.to_string(), value.to_string()));
            }
        }
    }

    /// Check if contains a shader define
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.defines
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
            .is_ok()
    }

    /// Get shader define value
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.defines
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
            .ok()
            .map(|idx| self.defines[idx].1.as_str())
    }

    /// Get shader defines count
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.defines.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defines.is_empty()
    }

    /// Iterate all shader defines
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &(String, String)> {
        self.defines.iter()
    }

    /// Merge shader defines from another `ShaderDefines`
    ///
    /// If there are conflicts, values from other will override values in self.
    pub fn merge(&mut self, other: &ShaderDefines) {
        for (key, value) in &other.defines {
            self.set(key, value);
        }
    }

    /// Create a new merged `ShaderDefines`
    #[must_use]
    pub fn merged_with(&self, other: &ShaderDefines) -> ShaderDefines {
        let mut result = self.clone();
        result.merge(other);
        result
    }

    /// Render the set as `-D KEY=VALUE` compiler arguments.
    #[must_use]
    pub fn to_flags(&self) -> Vec<String> {
        let mut flags = Vec::with_capacity(self.defines.len() * 2);
        for (key, value) in &self.defines {
            flags.push("-D".to_string());
            flags.push(format!("{key}={value}"));
        }
        flags
    }
}

/// Create `ShaderDefines` from list of macro definitions
impl From<&[(&str, &str)]> for ShaderDefines {
    fn from(defines: &[(&str, &str)]) -> Self {
        let mut result = Self::new();
        for (k, v) in defines {
            result.set(k, v);
        }
        result
    }
}

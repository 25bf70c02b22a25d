//! Noise glyph palette
//!
//! The default palette weights `_` heavily so scrambling text reads as
//! mostly blank with sparse symbols.

use super::random::RandomSource;
use crate::consts::NOISE_GLYPHS;
use crate::error::{DesktopError, DesktopResult};

/// Multiset of glyphs drawn while a position is scrambling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoisePalette {
    glyphs: Vec<char>,
}

impl Default for NoisePalette {
    fn default() -> Self {
        Self {
            glyphs: NOISE_GLYPHS.chars().collect(),
        }
    }
}

impl NoisePalette {
    /// Build a palette from a glyph string (duplicates act as weights)
    pub fn new(glyphs: &str) -> DesktopResult<Self> {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.is_empty() {
            return Err(DesktopError::Config("noise palette is empty".to_string()));
        }
        Ok(Self { glyphs })
    }

    /// Pick a glyph uniformly by index
    pub fn pick(&self, rng: &mut impl RandomSource) -> char {
        let idx = rng.below(self.glyphs.len() as u32) as usize;
        self.glyphs[idx]
    }

    pub fn contains(&self, glyph: char) -> bool {
        self.glyphs.contains(&glyph)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scramble::random::SequenceSource;

    #[test]
    fn test_default_palette() {
        let palette = NoisePalette::default();
        assert_eq!(palette.len(), 26);
        assert!(palette.contains('<'));
        assert!(palette.contains('\u{2014}'));
        assert!(!palette.contains('a'));
    }

    #[test]
    fn test_filler_weighting() {
        let palette = NoisePalette::default();
        let fillers = NOISE_GLYPHS.chars().filter(|&c| c == '_').count();
        // One `_` among the symbols plus eight trailing fillers
        assert_eq!(fillers, 9);
        assert_eq!(palette.len(), NOISE_GLYPHS.chars().count());
    }

    #[test]
    fn test_pick_by_index() {
        let palette = NoisePalette::new("abcd").unwrap();
        let mut rng = SequenceSource::new(vec![0.0, 0.26, 0.5, 0.99]);
        assert_eq!(palette.pick(&mut rng), 'a');
        assert_eq!(palette.pick(&mut rng), 'b');
        assert_eq!(palette.pick(&mut rng), 'c');
        assert_eq!(palette.pick(&mut rng), 'd');
    }

    #[test]
    fn test_empty_palette_rejected() {
        let err = NoisePalette::new("").unwrap_err();
        assert!(matches!(err, DesktopError::Config(_)));
    }
}

//! Per-position scramble jobs

use super::random::RandomSource;

/// Where a job is relative to the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPhase {
    /// Still showing the old character
    Pending,
    /// Showing noise glyphs
    Scrambling,
    /// Showing the target character for good
    Revealed,
}

/// Animation record for one character position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterJob {
    /// Character shown before obfuscation starts (`None` when the old text was shorter)
    pub from: Option<char>,
    /// Character shown once revealed (`None` when the new text is shorter)
    pub to: Option<char>,
    /// First frame that shows noise
    pub obfuscate_start_frame: u32,
    /// First frame that shows `to`; never earlier than `obfuscate_start_frame`
    pub reveal_frame: u32,
    /// Noise glyph currently on screen for this slot
    pub current_glyph: Option<char>,
}

impl CharacterJob {
    /// Roll start and duration as `floor(random * max_start)` and `floor(random * max_scramble)`
    pub fn roll(
        from: Option<char>,
        to: Option<char>,
        rng: &mut impl RandomSource,
        max_start: u32,
        max_scramble: u32,
    ) -> Self {
        let obfuscate_start_frame = rng.below(max_start);
        let reveal_frame = obfuscate_start_frame.saturating_add(rng.below(max_scramble));
        Self {
            from,
            to,
            obfuscate_start_frame,
            reveal_frame,
            current_glyph: None,
        }
    }

    #[inline]
    pub fn phase_at(&self, frame: u32) -> JobPhase {
        if frame >= self.reveal_frame {
            JobPhase::Revealed
        } else if frame >= self.obfuscate_start_frame {
            JobPhase::Scrambling
        } else {
            JobPhase::Pending
        }
    }
}

/// Build one job per position across `max(len(old), len(new))`
pub fn build_jobs(
    old: &str,
    new: &str,
    rng: &mut impl RandomSource,
    max_start: u32,
    max_scramble: u32,
) -> Vec<CharacterJob> {
    let old: Vec<char> = old.chars().collect();
    let new: Vec<char> = new.chars().collect();
    let len = old.len().max(new.len());

    (0..len)
        .map(|i| {
            CharacterJob::roll(
                old.get(i).copied(),
                new.get(i).copied(),
                &mut *rng,
                max_start,
                max_scramble,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAX_SCRAMBLE_FRAMES, MAX_START_FRAMES};
    use crate::scramble::random::SequenceSource;

    #[test]
    fn test_roll_uses_two_draws() {
        // start = floor(0.5 * 40) = 20, duration = floor(0.25 * 40) = 10
        let mut rng = SequenceSource::new(vec![0.5, 0.25]);
        let job = CharacterJob::roll(Some('a'), Some('b'), &mut rng, 40, 40);
        assert_eq!(job.obfuscate_start_frame, 20);
        assert_eq!(job.reveal_frame, 30);
        assert_eq!(job.current_glyph, None);
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn test_roll_keeps_order_at_extreme_spreads() {
        let mut rng = SequenceSource::constant(0.9);
        let job = CharacterJob::roll(None, Some('x'), &mut rng, u32::MAX, u32::MAX);
        assert!(job.obfuscate_start_frame <= job.reveal_frame);
        assert_eq!(job.reveal_frame, u32::MAX);
    }

    #[test]
    fn test_phase_boundaries() {
        let job = CharacterJob {
            from: Some('a'),
            to: Some('b'),
            obfuscate_start_frame: 5,
            reveal_frame: 9,
            current_glyph: None,
        };
        assert_eq!(job.phase_at(0), JobPhase::Pending);
        assert_eq!(job.phase_at(4), JobPhase::Pending);
        assert_eq!(job.phase_at(5), JobPhase::Scrambling);
        assert_eq!(job.phase_at(8), JobPhase::Scrambling);
        assert_eq!(job.phase_at(9), JobPhase::Revealed);
        assert_eq!(job.phase_at(100), JobPhase::Revealed);
    }

    #[test]
    fn test_zero_width_window_reveals_immediately() {
        let job = CharacterJob {
            from: None,
            to: Some('x'),
            obfuscate_start_frame: 3,
            reveal_frame: 3,
            current_glyph: None,
        };
        assert_eq!(job.phase_at(2), JobPhase::Pending);
        assert_eq!(job.phase_at(3), JobPhase::Revealed);
    }

    #[test]
    fn test_build_jobs_growing() {
        let mut rng = SequenceSource::constant(0.0);
        let jobs = build_jobs("AB", "XYZ", &mut rng, MAX_START_FRAMES, MAX_SCRAMBLE_FRAMES);
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].from, Some('A'));
        assert_eq!(jobs[0].to, Some('X'));
        assert_eq!(jobs[2].from, None);
        assert_eq!(jobs[2].to, Some('Z'));
    }

    #[test]
    fn test_build_jobs_shrinking() {
        let mut rng = SequenceSource::constant(0.3);
        let jobs = build_jobs("Hello", "", &mut rng, MAX_START_FRAMES, MAX_SCRAMBLE_FRAMES);
        assert_eq!(jobs.len(), 5);
        assert!(jobs.iter().all(|j| j.to.is_none()));
        assert_eq!(jobs[4].from, Some('o'));
    }

    #[test]
    fn test_build_jobs_counts_chars_not_bytes() {
        let mut rng = SequenceSource::constant(0.0);
        let jobs = build_jobs("héllo", "日本", &mut rng, 40, 40);
        assert_eq!(jobs.len(), 5);
        assert_eq!(jobs[1].from, Some('é'));
        assert_eq!(jobs[1].to, Some('本'));
    }

    #[test]
    fn test_build_jobs_empty() {
        let mut rng = SequenceSource::constant(0.0);
        assert!(build_jobs("", "", &mut rng, 40, 40).is_empty());
    }
}

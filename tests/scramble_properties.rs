//! Timing and scheduling properties of the text scramble

use std::rc::Rc;

use futures::FutureExt;
use proptest::prelude::*;

use portfolio_desktop::DesktopError;
use portfolio_desktop::platform::headless::{ManualScheduler, MemorySurface};
use portfolio_desktop::scramble::{
    JobPhase, RandomSource, Scrambler, SequenceSource, TextScramble, build_jobs, seeded,
};

const MAX_REVEAL: u32 = 78;

fn headless(initial: &str, seed: u64) -> (TextScramble<MemorySurface, rand_pcg::Pcg32>, Rc<ManualScheduler>) {
    let scheduler = Rc::new(ManualScheduler::new());
    let scramble = TextScramble::new(MemorySurface::new(initial), scheduler.clone(), seeded(seed));
    (scramble, scheduler)
}

proptest! {
    #[test]
    fn job_count_is_longer_length(old in "\\PC{0,24}", new in "\\PC{0,24}", seed in any::<u64>()) {
        let mut rng = seeded(seed);
        let jobs = build_jobs(&old, &new, &mut rng, 40, 40);
        prop_assert_eq!(jobs.len(), old.chars().count().max(new.chars().count()));
    }

    #[test]
    fn job_windows_are_ordered_and_bounded(text in "[a-zA-Z ]{0,40}", seed in any::<u64>()) {
        let mut rng = seeded(seed);
        for job in build_jobs("", &text, &mut rng, 40, 40) {
            prop_assert!(job.obfuscate_start_frame <= job.reveal_frame);
            prop_assert!(job.obfuscate_start_frame < 40);
            prop_assert!(job.reveal_frame <= MAX_REVEAL);
        }
    }

    #[test]
    fn completes_exactly_at_last_reveal(old in "[a-z]{0,12}", new in "[A-Z]{0,12}", seed in any::<u64>()) {
        let mut s = Scrambler::new(seeded(seed));
        s.retarget(&old, &new);
        let last = s.last_reveal_frame();

        for f in 0..last {
            let frame = s.step();
            prop_assert!(!frame.complete, "completed early at frame {}", f);
        }
        let frame = s.step();
        prop_assert!(frame.complete);
        prop_assert_eq!(frame.to_plain(), new);
        prop_assert!(s.jobs().iter().all(|j| j.phase_at(s.frame()) == JobPhase::Revealed));
    }

    #[test]
    fn set_text_resolves_within_bound(old in "[a-z]{0,10}", new in "[a-z]{0,10}", seed in any::<u64>()) {
        let (scramble, scheduler) = headless(&old, seed);
        let mut done = scramble.set_text(&new);
        let last = scramble.with_scrambler(|s| s.last_reveal_frame());

        // First update already ran inside set_text
        let ticks = scheduler.run_until_idle(MAX_REVEAL as usize + 1);
        prop_assert_eq!(ticks as u32, last);
        prop_assert!(matches!((&mut done).now_or_never(), Some(Ok(()))));
        prop_assert_eq!(scramble.with_surface(|s| s.writes()) as u32, last + 1);
        prop_assert_eq!(scramble.with_surface(|s| s.text().to_string()), new);
    }

    #[test]
    fn never_more_than_one_loop(phrases in prop::collection::vec("[a-z]{1,8}", 1..6), gaps in prop::collection::vec(0usize..20, 1..6), seed in any::<u64>()) {
        let (scramble, scheduler) = headless("", seed);
        let mut completions = Vec::new();
        for (phrase, gap) in phrases.iter().zip(gaps.iter().cycle()) {
            completions.push(scramble.set_text(phrase));
            prop_assert!(scheduler.pending() <= 1);
            for _ in 0..*gap {
                scheduler.tick();
                prop_assert!(scheduler.pending() <= 1);
            }
        }
        scheduler.run_until_idle(200);
        prop_assert!(scheduler.max_pending() <= 1);

        let last = completions.pop().expect("at least one phrase");
        prop_assert!(matches!(last.now_or_never(), Some(Ok(()))));
        prop_assert_eq!(scramble.with_surface(|s| s.text().to_string()), phrases.last().cloned().unwrap_or_default());
        for earlier in completions {
            // Each earlier run either finished before the next call or was superseded
            prop_assert!(earlier.now_or_never().is_some());
        }
    }
}

#[test]
fn growing_text_scenario() {
    let (scramble, scheduler) = headless("AB", 21);
    let done = scramble.set_text("XYZ");
    scramble.with_scrambler(|s| {
        assert_eq!(s.jobs().len(), 3);
        assert_eq!(s.jobs()[2].from, None);
    });
    scheduler.run_until_idle(100);
    assert!(matches!(done.now_or_never(), Some(Ok(()))));
    assert_eq!(scramble.with_surface(|s| s.text().to_string()), "XYZ");
}

#[test]
fn clearing_text_scenario() {
    let (scramble, scheduler) = headless("Hello", 22);
    let done = scramble.set_text("");
    assert_eq!(scramble.with_scrambler(|s| s.jobs().len()), 5);
    scheduler.run_until_idle(100);
    assert!(matches!(done.now_or_never(), Some(Ok(()))));
    assert_eq!(scramble.with_surface(|s| s.text().to_string()), "");
    assert_eq!(scramble.with_surface(|s| s.html().to_string()), "");
}

#[test]
fn identical_text_scenario() {
    // start = floor(0.25 * 40) = 10, duration = 10: both slots scramble for frames 10..20
    let scheduler = Rc::new(ManualScheduler::new());
    let scramble = TextScramble::new(
        MemorySurface::new("Hi"),
        scheduler.clone(),
        SequenceSource::constant(0.25),
    );
    let done = scramble.set_text("Hi");
    assert_eq!(scramble.with_scrambler(|s| s.jobs().len()), 2);

    let mut saw_noise = false;
    while scheduler.pending() > 0 {
        scheduler.tick();
        saw_noise |= scramble.with_surface(|s| s.html().contains("class=\"dud\""));
    }
    assert!(saw_noise);
    assert!(matches!(done.now_or_never(), Some(Ok(()))));
    assert_eq!(scramble.with_surface(|s| s.text().to_string()), "Hi");
}

#[test]
fn superseded_completion_is_rejected() {
    let (scramble, scheduler) = headless("Aman Kumar", 5);
    let first = scramble.set_text("AI Innovator");
    scheduler.tick();
    scheduler.tick();
    let second = scramble.set_text("Robotics Explorer");

    assert!(matches!(first.now_or_never(), Some(Err(DesktopError::Superseded))));
    scheduler.run_until_idle(100);
    assert!(matches!(second.now_or_never(), Some(Ok(()))));
    assert_eq!(scheduler.max_pending(), 1);
}

#[test]
fn sequence_source_drives_palette_picks() {
    let mut rng = SequenceSource::new(vec![0.0, 0.5]);
    assert_eq!(rng.below(26), 0);
    assert_eq!(rng.below(26), 13);
}

use super::*;

#[test]
fn test_progress_bar_hidden_in_quiet_mode() {
    let progress = ScanProgress::new(100, true);
    progress.inc();
    progress.inc();
    assert_eq!(progress.position(), 2);
    progress.finish();
}

#[test]
fn test_progress_bar_clone_shares_counter() {
    let progress = ScanProgress::new(100, true);
    let cloned = progress.clone();

    progress.inc();
    cloned.inc();

    assert_eq!(progress.position(), 2);
    progress.finish();
}

#[test]
fn test_visible_progress_bar_counts() {
    let progress = ScanProgress::new_with_visibility(3, false, true);
    for _ in 0..3 {
        progress.inc();
    }
    assert_eq!(progress.position(), 3);
    progress.finish();
}

#[test]
fn test_progress_bar_from_rayon() {
    use rayon::prelude::*;

    let progress = ScanProgress::new(50, true);
    (0..50).into_par_iter().for_each(|_| progress.inc());
    assert_eq!(progress.position(), 50);
}

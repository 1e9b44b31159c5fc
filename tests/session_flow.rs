// SPDX-License-Identifier: MPL-2.0
//! Intake, analysis and toast behavior across a user session.

use skin_lens::client::AnalysisResult;
use skin_lens::error::AnalysisError;
use skin_lens::intake::{Candidate, ImageIntake, IntakeError};
use skin_lens::ui::analysis::{AnalysisState, BeginError, Outcome, Status};
use skin_lens::ui::notifications::{Manager, Notification, NotificationText, ToastKind};
use std::io::Cursor;
use std::time::{Duration, Instant};

const LIMIT: usize = 1024 * 1024;

fn png_bytes() -> Vec<u8> {
    let image = image_rs::RgbImage::from_pixel(3, 2, image_rs::Rgb([200, 120, 90]));
    let mut bytes = Vec::new();
    image_rs::DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut bytes), image_rs::ImageFormat::Png)
        .expect("encode png");
    bytes
}

fn photo() -> Candidate {
    Candidate::new(png_bytes(), "image/png", "lesion.png")
}

fn sample_result() -> AnalysisResult {
    serde_json::from_value(serde_json::json!({
        "name": "Eksim",
        "confidence": "0.875",
        "sorted_probs": [["eksim", 0.875], ["acne", 0.125]]
    }))
    .expect("result")
}

#[test]
fn test_reselecting_same_file_yields_new_image() {
    let mut intake = ImageIntake::new(LIMIT);

    let first = intake.submit(photo()).expect("accepted").id;
    assert_eq!(intake.remove(), Some(first));
    assert!(intake.current().is_none());

    let second = intake.submit(photo()).expect("accepted again").id;
    assert!(second > first);
    assert_eq!(intake.current().and_then(|image| image.dimensions), Some((3, 2)));
}

#[test]
fn test_at_most_one_live_preview() {
    let mut intake = ImageIntake::new(LIMIT);

    for _ in 0..5 {
        intake.submit(photo()).expect("accepted");
        assert_eq!(intake.registry().live(), 1);
    }
    intake.remove();

    assert_eq!(intake.registry().live(), 0);
    assert_eq!(intake.registry().created(), 5);
    assert_eq!(intake.registry().released(), 5);
}

#[test]
fn test_rejected_candidate_keeps_previous_image() {
    let mut intake = ImageIntake::new(LIMIT);
    let kept = intake.submit(photo()).expect("accepted").id;

    let text = Candidate::new(b"hello".to_vec(), "text/plain", "notes.txt");
    assert_eq!(intake.submit(text).unwrap_err(), IntakeError::InvalidFileType);

    let huge = Candidate::new(vec![0u8; LIMIT + 1], "image/jpeg", "huge.jpg");
    assert!(matches!(
        intake.submit(huge),
        Err(IntakeError::FileTooLarge { limit: LIMIT, .. })
    ));

    assert_eq!(intake.current_id(), Some(kept));
    assert_eq!(intake.registry().live(), 1);
}

#[test]
fn test_analysis_requires_image_and_no_request_in_flight() {
    let mut intake = ImageIntake::new(LIMIT);
    let mut analysis = AnalysisState::new();

    assert_eq!(analysis.begin(intake.current_id()), Err(BeginError::NoImage));

    intake.submit(photo()).expect("accepted");
    analysis.begin(intake.current_id()).expect("started");
    assert_eq!(
        analysis.begin(intake.current_id()),
        Err(BeginError::InFlight)
    );
}

#[test]
fn test_response_after_removal_is_discarded() {
    let mut intake = ImageIntake::new(LIMIT);
    let mut analysis = AnalysisState::new();
    let now = Instant::now();

    intake.submit(photo()).expect("accepted");
    let ticket = analysis.begin(intake.current_id()).expect("started");

    intake.remove();
    analysis.reset();

    let outcome = analysis.complete(ticket, Ok(sample_result()), now);
    assert_eq!(outcome, Outcome::Discarded);
    assert_eq!(analysis.status(), Status::Idle);
    assert!(analysis.result().is_none());
}

#[test]
fn test_response_for_replaced_image_is_discarded() {
    let mut intake = ImageIntake::new(LIMIT);
    let mut analysis = AnalysisState::new();
    let now = Instant::now();

    intake.submit(photo()).expect("accepted");
    let stale = analysis.begin(intake.current_id()).expect("started");

    intake.submit(photo()).expect("replacement");
    analysis.reset();
    let fresh = analysis.begin(intake.current_id()).expect("restarted");

    assert_eq!(
        analysis.complete(stale, Err(AnalysisError::NetworkFailure), now),
        Outcome::Discarded
    );
    assert!(analysis.is_analyzing());

    assert_eq!(
        analysis.complete(fresh, Ok(sample_result()), now),
        Outcome::Succeeded
    );
    assert_eq!(analysis.status(), Status::Success);
    assert_eq!(fresh.image_id(), intake.current_id().expect("image"));
}

#[test]
fn test_error_then_retry_succeeds() {
    let mut intake = ImageIntake::new(LIMIT);
    let mut analysis = AnalysisState::new();
    let now = Instant::now();
    intake.submit(photo()).expect("accepted");

    let ticket = analysis.begin(intake.current_id()).expect("started");
    let rejected = AnalysisError::BackendRejected("Model error".to_string());
    assert_eq!(
        analysis.complete(ticket, Err(rejected.clone()), now),
        Outcome::Failed(rejected)
    );
    assert_eq!(analysis.status(), Status::Error);
    assert!(intake.current().is_some());

    let retry = analysis.begin(intake.current_id()).expect("retry");
    assert_eq!(analysis.status(), Status::Analyzing);
    assert!(analysis.error().is_none());
    assert_eq!(
        analysis.complete(retry, Ok(sample_result()), now),
        Outcome::Succeeded
    );
    let result = analysis.result().expect("result");
    assert_eq!(result.name, "Eksim");
    assert!((result.confidence - 0.875).abs() < 1e-9);
}

#[test]
fn test_ring_sweeps_after_delay() {
    let mut intake = ImageIntake::new(LIMIT);
    let mut analysis = AnalysisState::new();
    let now = Instant::now();
    intake.submit(photo()).expect("accepted");

    let ticket = analysis.begin(intake.current_id()).expect("started");
    analysis.complete(ticket, Ok(sample_result()), now);

    assert_eq!(analysis.ring().percent_at(now), 0.0);
    assert!(analysis.is_animating(now));

    let settled = now + Duration::from_secs(5);
    assert!((analysis.ring().percent_at(settled) - analysis.ring().target()).abs() < 0.01);
    assert!(!analysis.is_animating(settled));
}

#[test]
fn test_latest_toast_wins_and_expires() {
    let mut manager = Manager::with_duration(Duration::from_millis(3000));
    let start = Instant::now();

    manager.show_at(Notification::success("toast_removed"), start);
    manager.show_at(
        Notification::verbatim(
            ToastKind::Error,
            "Server down",
        ),
        start + Duration::from_millis(1000),
    );

    assert_eq!(
        manager.current().map(Notification::text),
        Some(&NotificationText::Verbatim("Server down".to_string()))
    );

    // The first toast's deadline no longer applies.
    manager.tick(start + Duration::from_millis(3500));
    assert!(manager.is_visible());

    manager.tick(start + Duration::from_millis(4000));
    assert!(!manager.is_visible());
}

/*!
 * Integration tests for the full translation pipeline.
 *
 * Each test runs a job end to end against a scripted backend and checks the
 * result shape, the calls the backend received and the pauses taken.
 */

use std::sync::Arc;
use std::time::Duration;

use tuberlate::providers::mock::MockProvider;
use tuberlate::translation::{
    IntervalThrottle, ManualClock, Pause, ServiceOptions, TranslationJob, TranslationService,
};

use crate::common::mock_providers::{Call, CallLog};
use crate::common::{service_with, texts};

/// A working batch keeps empty strings in place
#[tokio::test]
async fn test_pipeline_withWorkingBatch_shouldTranslateInOrder() {
    let backend = CallLog::new(MockProvider::working().with_dictionary(&[("Hello", "Bonjour"), ("World", "Monde")]));
    let (service, _) = service_with(backend.clone());

    let result = service.translate(TranslationJob::new(["Hello", "", "World"], "fr")).await;

    assert!(result.success);
    assert_eq!(result.translations, texts(&["Bonjour", "", "Monde"]));
    assert_eq!(backend.batch_sizes(), vec![3]);
}

/// 26 texts split into batches of 25 and 1 with a single pause between them
#[tokio::test]
async fn test_pipeline_with26Texts_shouldPauseOnceBetweenBatches() {
    let backend = CallLog::new(MockProvider::working());
    let (service, throttle) = service_with(backend.clone());
    let input: Vec<String> = (0..26).map(|i| format!("line {}", i)).collect();

    let result = service.translate(TranslationJob::new(input.clone(), "es")).await;

    assert!(result.success);
    assert_eq!(result.translations.len(), 26);
    assert_eq!(result.translations[25], "[es] line 25");
    assert_eq!(backend.batch_sizes(), vec![25, 1]);
    assert_eq!(throttle.pauses(), vec![Pause::BetweenBatches]);
}

/// The same 26 texts with real interval delays recorded on a manual clock
#[tokio::test]
async fn test_pipeline_withIntervalThrottle_shouldSleepConfiguredDelay() {
    let clock = Arc::new(ManualClock::new());
    let throttle = Arc::new(IntervalThrottle::with_clock(
        Duration::from_millis(100),
        Duration::from_millis(50),
        clock.clone(),
    ));
    let service = TranslationService::new(Arc::new(MockProvider::working()), throttle, ServiceOptions::default());
    let input: Vec<String> = (0..26).map(|i| i.to_string()).collect();

    service.translate(TranslationJob::new(input, "es")).await;

    assert_eq!(clock.sleeps(), vec![Duration::from_millis(100)]);
}

/// An unreachable backend fails the whole job with a diagnostic
#[tokio::test]
async fn test_pipeline_withUnreachableBackend_shouldReturnOriginals() {
    crate::common::init_test_logging();
    let backend = MockProvider::unreachable();
    let (service, _) = service_with(backend);

    let result = service.translate(TranslationJob::new(["Hello", "", "World"], "fr")).await;

    assert!(!result.success);
    assert_eq!(result.translations, texts(&["Hello", "", "World"]));
    assert_eq!(
        result.error.as_deref(),
        Some("Translation service temporarily unavailable. Showing original text.")
    );
}

/// A failed batch is retried item by item, in order
#[tokio::test]
async fn test_pipeline_withFailingBatch_shouldTranslateItemsIndividually() {
    crate::common::init_test_logging();
    let backend = CallLog::new(MockProvider::batch_failing().with_dictionary(&[("Hello", "Hola"), ("World", "Mundo")]));
    let (service, throttle) = service_with(backend.clone());

    let result = service.translate(TranslationJob::new(["Hello", "", "World"], "es")).await;

    assert!(result.success);
    assert_eq!(result.translations, texts(&["Hola", "", "Mundo"]));
    assert_eq!(
        backend.calls(),
        vec![
            Call::Prepare("es".to_string()),
            Call::Batch(3),
            Call::Item("Hello".to_string()),
            Call::Item("World".to_string()),
        ]
    );
    // One pause after "Hello"; none for the skipped "" or the final "World"
    assert_eq!(throttle.pauses(), vec![Pause::BetweenItems]);
}

/// When both the batch and an item fail, only that position keeps its original
#[tokio::test]
async fn test_pipeline_withBatchAndItemFailure_shouldKeepOriginalAtThatPosition() {
    let backend = MockProvider::batch_failing().with_failing_texts(&["World"]);
    let (service, _) = service_with(backend);

    let result = service.translate(TranslationJob::new(["Hello", "World", "Again"], "de")).await;

    assert!(result.success);
    assert_eq!(result.translations, texts(&["[de] Hello", "World", "[de] Again"]));
}

/// Later batches still go out after an earlier batch degraded
#[tokio::test]
async fn test_pipeline_withIntermittentBackend_shouldPreserveLengthAndOrder() {
    let backend = MockProvider::intermittent(2);
    let (service, _) = crate::common::service_with_batch_size(backend, 3);
    let input: Vec<String> = (0..10).map(|i| format!("t{}", i)).collect();

    let result = service.translate(TranslationJob::new(input.clone(), "fr")).await;

    assert!(result.success);
    assert_eq!(result.translations.len(), input.len());
    for (translated, original) in result.translations.iter().zip(&input) {
        assert!(translated == original || *translated == format!("[fr] {}", original));
    }
}

/// HTML entities in the backend's output are decoded
#[tokio::test]
async fn test_pipeline_withEntitiesInOutput_shouldDecodeThem() {
    let backend = MockProvider::working().with_dictionary(&[
        ("Fish & chips", "Poisson &amp; frites"),
        ("Coffee", "Caf&eacute;"),
        ("Quote", "&quot;Bonjour&quot; &#39;ami&#39;"),
    ]);
    let (service, _) = service_with(backend);

    let result = service
        .translate(TranslationJob::new(["Fish & chips", "Coffee", "Quote"], "fr"))
        .await;

    assert_eq!(result.translations, texts(&["Poisson & frites", "Café", "\"Bonjour\" 'ami'"]));
}

/// A non-string value in a batch answer is replaced by the original text
#[tokio::test]
async fn test_pipeline_withNonStringValue_shouldUseOriginal() {
    let backend = CallLog::new(MockProvider::non_string_at(1));
    let (service, _) = service_with(backend.clone());

    let result = service.translate(TranslationJob::new(["a", "b", "c"], "nl")).await;

    assert!(result.success);
    assert_eq!(result.translations, texts(&["[nl] a", "b", "[nl] c"]));
    // Not treated as a batch failure
    assert_eq!(backend.translate_calls(), 1);
}

/// A batch answer of the wrong length degrades the batch
#[tokio::test]
async fn test_pipeline_withMismatchedCount_shouldRetryItems() {
    let backend = CallLog::new(MockProvider::mismatched());
    let (service, _) = service_with(backend.clone());

    let result = service.translate(TranslationJob::new(["a", "b"], "fr")).await;

    assert!(result.success);
    assert_eq!(result.translations, texts(&["[fr] a", "[fr] b"]));
    assert_eq!(backend.batch_sizes(), vec![2]);
    assert_eq!(backend.translate_calls(), 3);
}

/// English in any casing is returned verbatim without touching the backend
#[tokio::test]
async fn test_pipeline_withEnglishTarget_shouldMakeNoCalls() {
    for target in ["en", "EN", "En"] {
        let backend = CallLog::new(MockProvider::working());
        let (service, throttle) = service_with(backend.clone());

        let job = TranslationJob {
            texts: vec![Some("Hello".to_string()), None, Some("World".to_string())],
            target: Some(target.to_string()),
        };
        let result = service.translate(job).await;

        assert!(result.success);
        assert_eq!(result.translations, texts(&["Hello", "", "World"]));
        assert!(backend.calls().is_empty());
        assert!(throttle.pauses().is_empty());
    }
}

/// Output length always matches input length, whatever the backend does
#[tokio::test]
async fn test_pipeline_withEveryBehavior_shouldPreserveLength() {
    let backends = vec![
        MockProvider::working(),
        MockProvider::batch_failing(),
        MockProvider::failing(),
        MockProvider::unreachable(),
        MockProvider::mismatched(),
        MockProvider::non_string_at(0),
        MockProvider::intermittent(3),
    ];
    let input = texts(&["one", "", "two", "three", "", "four", "five"]);

    for backend in backends {
        let (service, _) = crate::common::service_with_batch_size(backend, 3);
        let result = service.translate(TranslationJob::new(input.clone(), "fr")).await;
        assert_eq!(result.translations.len(), input.len());
        assert_eq!(result.translations[1], "");
        assert_eq!(result.translations[4], "");
    }
}

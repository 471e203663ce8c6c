//! The default engine refuses to classify before it is initialized.

use mph_engine::{global, EngineError};
use mph_types::{ComputeOptions, TumorRecord};

#[test]
fn test_uninitialized_engine_is_an_error() {
    let t1 = TumorRecord::new("C509", "8500", "3", "1", "2019");
    let t2 = TumorRecord::new("C509", "8500", "3", "2", "2019");

    let err = global::compute_primaries(&t1, &t2, &ComputeOptions::default()).unwrap_err();
    assert!(matches!(err, EngineError::NotInitialized));
    assert!(matches!(global::get(), Err(EngineError::NotInitialized)));
    assert!(matches!(
        global::select_group("C509", "8500", "3", "2019"),
        Err(EngineError::NotInitialized)
    ));
}

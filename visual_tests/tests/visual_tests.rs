use visual_tests::{
    run_visual_test, should_update_references, update_reference, Scene, VisualTestConfig,
};

/// Helper macro to generate visual test functions
macro_rules! visual_test {
    ($name:ident, $scene:expr) => {
        #[test]
        fn $name() {
            if should_update_references() {
                update_reference($scene).expect("Failed to update reference");
                return;
            }

            let result = run_visual_test(&VisualTestConfig {
                scene: $scene,
                similarity_threshold: 0.999,
            })
            .expect("Visual test failed to run");

            assert!(
                result.passed,
                "Visual regression detected for '{}': similarity {:.4}% (threshold: 99.9%)\n\
                 Reference: {}\n\
                 Captured:  {}\n\
                 Diff:      {}",
                $scene.name(),
                result.similarity * 100.0,
                result.reference_path.display(),
                result.captured_path.display(),
                result
                    .diff_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "N/A".to_string())
            );
        }
    };
}

visual_test!(test_unselected, Scene::Unselected);
visual_test!(test_selected, Scene::Selected);
visual_test!(test_mid_expand, Scene::MidExpand);
visual_test!(test_mid_shrink, Scene::MidShrink);
visual_test!(test_group, Scene::Group);

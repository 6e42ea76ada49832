use crate::plot::{ScatterPlot, ScatterRenderer};
use crate::{Dataset, Result, Transformation, TransformError, TransformationConfig};

use approx::assert_abs_diff_eq;
use ndarray::{array, Array2};

const TOL: f64 = 1e-9;

fn corners() -> Dataset {
    Dataset::from_headers(
        vec!["x", "y", "label"],
        array![[0.0, 0.0, 1.0], [10.0, 0.0, 2.0], [0.0, 10.0, 3.0], [10.0, 10.0, 4.0]],
    )
    .unwrap()
}

fn xyz(rows: Array2<f64>) -> Transformation {
    let ds = Dataset::from_headers(vec!["x", "y", "z"], rows).unwrap();
    let mut tr = Transformation::new(ds);
    tr.project(&["x", "y", "z"]).unwrap();
    tr
}

mod projection_tests {
    use super::*;

    #[test]
    fn project_keeps_requested_order_and_mapping() {
        let mut tr = Transformation::new(corners());
        tr.project(&["label", "x"]).unwrap();
        let data = tr.data().unwrap();
        assert_eq!(data.get_headers(), &["label".to_string(), "x".to_string()]);
        assert_eq!(data.get_mappings()["label"], 0);
        assert_eq!(data.get_mappings()["x"], 1);
        assert_eq!(data.get_all_data(), array![[1.0, 0.0], [2.0, 10.0], [3.0, 0.0], [4.0, 10.0]]);
    }

    #[test]
    fn project_replaces_previous_projection() {
        let mut tr = Transformation::new(corners());
        tr.project(&["x", "y"]).unwrap();
        tr.translate(&[1.0, 1.0]).unwrap();
        tr.project(&["y"]).unwrap();
        assert_eq!(tr.data().unwrap().get_all_data(), array![[0.0], [0.0], [10.0], [10.0]]);
    }

    #[test]
    fn failed_projection_leaves_state_alone() {
        let mut tr = Transformation::new(corners());
        tr.project(&["x"]).unwrap();
        let err = tr.project(&["x", "w"]).unwrap_err();
        assert!(matches!(err, TransformError::UnknownHeader { ref header } if header == "w"));
        assert_eq!(tr.data().unwrap().get_headers(), &["x".to_string()]);

        assert!(matches!(
            tr.project::<&str>(&[]),
            Err(TransformError::EmptySelection)
        ));
    }

    #[test]
    fn operations_before_projection_fail() {
        let mut tr = Transformation::new(corners());
        assert!(matches!(tr.data(), Err(TransformError::NotProjected)));
        assert!(matches!(tr.get_data_homogeneous(), Err(TransformError::NotProjected)));
        assert!(matches!(tr.translate(&[1.0]), Err(TransformError::NotProjected)));
        assert!(matches!(tr.normalize_together(), Err(TransformError::NotProjected)));
    }

    #[test]
    fn with_projection_checks_sample_count() {
        let projected = Dataset::from_headers(vec!["x"], array![[0.0], [1.0]]).unwrap();
        assert!(matches!(
            Transformation::with_projection(corners(), projected),
            Err(TransformError::InvalidDataset(_))
        ));

        let projected = Dataset::from_headers(vec!["x"], array![[0.0], [1.0], [2.0], [3.0]]).unwrap();
        let tr = Transformation::with_projection(corners(), projected).unwrap();
        assert_eq!(tr.data().unwrap().get_num_samples(), 4);
    }

    #[test]
    fn homogeneous_data_does_not_touch_state() {
        let mut tr = Transformation::new(corners());
        tr.project(&["x", "y"]).unwrap();
        let dh = tr.get_data_homogeneous().unwrap();
        assert_eq!(dh.dim(), (4, 3));
        assert!(dh.column(2).iter().all(|&v| v == 1.0));
        assert_eq!(tr.data().unwrap().get_num_dims(), 2);
    }
}

mod transform_tests {
    use super::*;

    #[test]
    fn translate_then_scale_corners() {
        let mut tr = Transformation::new(corners());
        tr.project(&["x", "y"]).unwrap();

        let translated = tr.translate(&[5.0, 5.0]).unwrap();
        assert_abs_diff_eq!(
            translated,
            array![[5.0, 5.0], [15.0, 5.0], [5.0, 15.0], [15.0, 15.0]],
            epsilon = TOL
        );

        let scaled = tr.scale(&[0.1, 0.1]).unwrap();
        assert_abs_diff_eq!(
            scaled,
            array![[0.5, 0.5], [1.5, 0.5], [0.5, 1.5], [1.5, 1.5]],
            epsilon = TOL
        );
        assert_abs_diff_eq!(tr.data().unwrap().get_all_data(), scaled, epsilon = 0.0);
    }

    #[test]
    fn transform_keeps_headers_and_original() {
        let mut tr = Transformation::new(corners());
        tr.project(&["y", "x"]).unwrap();
        tr.scale(&[2.0, 3.0]).unwrap();
        let data = tr.data().unwrap();
        assert_eq!(data.get_headers(), &["y".to_string(), "x".to_string()]);
        assert_eq!(data.get_mappings()["x"], 1);
        assert_eq!(tr.original(), &corners());
    }

    #[test]
    fn returned_array_is_independent_of_state() {
        let mut tr = Transformation::new(corners());
        tr.project(&["x"]).unwrap();
        let mut out = tr.scale(&[2.0]).unwrap();
        out.fill(-1.0);
        assert_eq!(tr.data().unwrap().get_all_data(), array![[0.0], [20.0], [0.0], [20.0]]);
    }

    #[test]
    fn wrong_magnitude_count_is_a_shape_mismatch() {
        let mut tr = Transformation::new(corners());
        tr.project(&["x", "y"]).unwrap();
        let err = tr.translate(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            TransformError::ShapeMismatch { context: "translation_matrix", expected: (2, 1), found: (3, 1) }
        ));
        assert!(tr.scale(&[1.0]).is_err());
    }

    #[test]
    fn transform_with_wrong_matrix_size_leaves_state_alone() {
        let mut tr = Transformation::new(corners());
        tr.project(&["x", "y"]).unwrap();
        let before = tr.data().unwrap().get_all_data();
        let err = tr.transform(&Array2::eye(4)).unwrap_err();
        assert!(matches!(err, TransformError::ShapeMismatch { expected: (3, 3), .. }));
        assert_eq!(tr.data().unwrap().get_all_data(), before);
    }

    #[test]
    fn translate_matches_transform_of_translation_matrix() {
        let mut a = Transformation::new(corners());
        a.project(&["x", "y", "label"]).unwrap();
        let mut b = a.clone();

        let via_wrapper = a.translate(&[1.0, -2.0, 0.5]).unwrap();
        let t = b.translation_matrix(&[1.0, -2.0, 0.5]).unwrap();
        let via_transform = b.transform(&t).unwrap();
        assert_eq!(via_wrapper, via_transform);
    }
}

mod rotation_tests {
    use super::*;

    #[test]
    fn rotate_about_z_by_90() {
        let mut tr = xyz(array![[1.0, 0.0, 0.0]]);
        let out = tr.rotate_3d("z", 90.0).unwrap();
        assert_abs_diff_eq!(out, array![[0.0, 1.0, 0.0]], epsilon = TOL);
    }

    #[test]
    fn rotate_about_x_and_y_by_90() {
        let mut tr = xyz(array![[0.0, 1.0, 0.0]]);
        let out = tr.rotate_3d("x", 90.0).unwrap();
        assert_abs_diff_eq!(out, array![[0.0, 0.0, 1.0]], epsilon = TOL);

        let mut tr = xyz(array![[0.0, 0.0, 1.0]]);
        let out = tr.rotate_3d("y", 90.0).unwrap();
        assert_abs_diff_eq!(out, array![[1.0, 0.0, 0.0]], epsilon = TOL);
    }

    #[test]
    fn axis_follows_projection_order_not_original_order() {
        // "z" projected first is axis 0, so rotating about it moves y into z.
        let ds = Dataset::from_headers(vec!["x", "y", "z"], array![[0.0, 1.0, 0.0]]).unwrap();
        let mut tr = Transformation::new(ds);
        tr.project(&["z", "y", "x"]).unwrap();
        let out = tr.rotate_3d("z", 90.0).unwrap();
        assert_abs_diff_eq!(out, array![[0.0, 0.0, 1.0]], epsilon = TOL);
    }

    #[test]
    fn rotation_requires_three_variables() {
        let mut tr = Transformation::new(corners());
        tr.project(&["x", "y"]).unwrap();
        assert!(matches!(
            tr.rotate_3d("x", 45.0),
            Err(TransformError::RotationDimension { found: 2 })
        ));
    }

    #[test]
    fn rotation_about_unprojected_header_fails() {
        let mut tr = xyz(array![[1.0, 2.0, 3.0]]);
        assert!(matches!(
            tr.rotation_matrix_3d("w", 45.0),
            Err(TransformError::UnknownHeader { .. })
        ));
    }

    #[test]
    fn zero_and_full_turn_are_identity() {
        let rows = array![[1.0, -2.0, 3.5], [0.25, 4.0, -1.0]];
        for header in ["x", "y", "z"] {
            let mut tr = xyz(rows.clone());
            assert_abs_diff_eq!(tr.rotate_3d(header, 0.0).unwrap(), rows, epsilon = TOL);
            assert_abs_diff_eq!(tr.rotate_3d(header, 360.0).unwrap(), rows, epsilon = TOL);
        }
    }
}

mod normalize_tests {
    use super::*;

    #[test]
    fn normalize_together_single_variable() {
        let ds = Dataset::from_headers(vec!["v"], array![[0.0], [5.0], [10.0]]).unwrap();
        let mut tr = Transformation::new(ds);
        tr.project(&["v"]).unwrap();
        let out = tr.normalize_together().unwrap();
        assert_abs_diff_eq!(out, array![[0.0], [0.5], [1.0]], epsilon = TOL);
    }

    #[test]
    fn normalize_together_uses_one_global_range() {
        let ds = Dataset::from_headers(vec!["a", "b"], array![[2.0, 4.0], [6.0, 10.0]]).unwrap();
        let mut tr = Transformation::new(ds);
        tr.project(&["a", "b"]).unwrap();
        let out = tr.normalize_together().unwrap();
        assert_abs_diff_eq!(out, array![[0.0, 0.25], [0.5, 1.0]], epsilon = TOL);
    }

    #[test]
    fn normalize_separately_uses_each_range() {
        let ds = Dataset::from_headers(vec!["a", "b"], array![[2.0, 4.0], [6.0, 10.0], [4.0, 7.0]]).unwrap();
        let mut tr = Transformation::new(ds);
        tr.project(&["a", "b"]).unwrap();
        let out = tr.normalize_separately().unwrap();
        assert_abs_diff_eq!(out, array![[0.0, 0.0], [1.0, 1.0], [0.5, 0.5]], epsilon = TOL);
        assert_abs_diff_eq!(tr.data().unwrap().get_all_data(), out, epsilon = 0.0);
    }

    #[test]
    fn constant_variable_gives_non_finite_values() {
        let ds = Dataset::from_headers(vec!["a", "b"], array![[1.0, 3.0], [2.0, 3.0]]).unwrap();
        let mut tr = Transformation::new(ds);
        tr.project(&["a", "b"]).unwrap();
        let out = tr.normalize_separately().unwrap();
        assert_abs_diff_eq!(out[[1, 0]], 1.0, epsilon = TOL);
        assert!(out.column(1).iter().all(|v| !v.is_finite()));
    }

    #[test]
    fn degenerate_warning_can_be_disabled() {
        let config = TransformationConfig {
            warn_on_degenerate_range: false,
            ..TransformationConfig::default()
        };
        let ds = Dataset::from_headers(vec!["a"], array![[7.0], [7.0]]).unwrap();
        let mut tr = Transformation::with_config(ds, config);
        tr.project(&["a"]).unwrap();
        let out = tr.normalize_together().unwrap();
        assert!(out.iter().all(|v| v.is_nan()));
        assert!(!tr.config().warn_on_degenerate_range);
    }
}

mod scatter_tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        plots: Vec<ScatterPlot>,
    }

    impl ScatterRenderer for Recorder {
        fn render(&mut self, plot: &ScatterPlot) -> Result<()> {
            self.plots.push(plot.clone());
            Ok(())
        }
    }

    #[test]
    fn scatter_binds_three_distinct_variables_from_original() {
        let mut tr = Transformation::new(corners());
        tr.project(&["x", "y"]).unwrap();
        tr.scale(&[100.0, 100.0]).unwrap();

        let mut recorder = Recorder::default();
        tr.scatter_color("x", "y", "label", Some("corners"), &mut recorder)
            .unwrap();
        let plot = &recorder.plots[0];
        assert_eq!(plot.x, vec![0.0, 10.0, 0.0, 10.0]);
        assert_eq!(plot.y, vec![0.0, 0.0, 10.0, 10.0]);
        assert_eq!(plot.color, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(plot.color_label, "label");
        assert_eq!(plot.title.as_deref(), Some("corners"));
        assert_eq!(plot.style.marker_size, 75.0);
    }

    #[test]
    fn scatter_unknown_variable_fails_before_rendering() {
        let tr = Transformation::new(corners());
        let mut recorder = Recorder::default();
        let err = tr
            .scatter_color("x", "y", "nope", None, &mut recorder)
            .unwrap_err();
        assert!(matches!(err, TransformError::UnknownHeader { .. }));
        assert!(recorder.plots.is_empty());
    }
}

use super::sink::fade_out_levels;

#[test]
fn fade_out_levels_descend_to_silence() {
    let levels: Vec<f32> = fade_out_levels(0.4, 4).collect();
    assert_eq!(levels.len(), 4);
    assert!(levels.windows(2).all(|w| w[0] > w[1]));
    assert!((levels[0] - 0.3).abs() < 1e-6);
    assert!(levels[3].abs() < 1e-6);
}

#[test]
fn fade_out_levels_treat_zero_steps_as_one() {
    let levels: Vec<f32> = fade_out_levels(1.0, 0).collect();
    assert_eq!(levels.len(), 1);
    assert!(levels[0].abs() < 1e-6);
}

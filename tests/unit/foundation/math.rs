use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(0, 255), 0);
    assert_eq!(mul_div255_u16(128, 128), 64);
}

#[test]
fn premultiply_zero_alpha_clears_color() {
    let mut px = [200u8, 100, 50, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, [0, 0, 0, 0]);
}

#[test]
fn premul_rgba8_opaque_is_identity() {
    assert_eq!(premul_rgba8([10, 20, 30, 255]), [10, 20, 30, 255]);
}

#[test]
fn flatten_premul_alpha_0_returns_bg() {
    let src = [0u8, 0, 0, 0];
    let mut dst = [0u8; 4];
    flatten_premul_over_bg(&mut dst, &src, [10, 20, 30, 255]);
    assert_eq!(dst, [10, 20, 30, 255]);
}

#[test]
fn flatten_premul_alpha_255_is_identity() {
    let src = [1u8, 2, 3, 255];
    let mut dst = [0u8; 4];
    flatten_premul_over_bg(&mut dst, &src, [10, 20, 30, 255]);
    assert_eq!(dst, src);
}

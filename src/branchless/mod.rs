//! Branchless Operations: "CPUの迷いをなくす"
//!
//! The highlight pass touches every star on every keystroke and runs a
//! component-wise max per neighbor. Those inner loops use the mask-select
//! helpers below instead of `if`/`else` chains.
//!
//! - select / min / max / clamp on `f32`
//! - component-wise max over RGB triples (highlight max-combine)
//! - palette hex parsing (`color`)

pub mod color;

/// Branchless select: if cond { a } else { b }
/// Works by computing both and masking.
#[inline(always)]
pub fn select_f32(cond: bool, a: f32, b: f32) -> f32 {
    let m = -(cond as i32) as u32; // 0xFFFFFFFF if true, 0x00000000 if false
    let a_bits = a.to_bits();
    let b_bits = b.to_bits();
    f32::from_bits((a_bits & m) | (b_bits & !m))
}

/// Branchless min
#[inline(always)]
pub fn min_f32(a: f32, b: f32) -> f32 {
    select_f32(a < b, a, b)
}

/// Branchless max
#[inline(always)]
pub fn max_f32(a: f32, b: f32) -> f32 {
    select_f32(a > b, a, b)
}

/// Branchless clamp
#[inline(always)]
pub fn clamp_f32(val: f32, lo: f32, hi: f32) -> f32 {
    max_f32(lo, min_f32(val, hi))
}

/// Component-wise max of two RGB triples, written back into `dst`.
///
/// No clamping: values above 1.0 survive (overdrive for the glow).
#[inline(always)]
pub fn max_rgb_in_place(dst: &mut [f32], src: [f32; 3]) {
    dst[0] = max_f32(dst[0], src[0]);
    dst[1] = max_f32(dst[1], src[1]);
    dst[2] = max_f32(dst[2], src[2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_f32() {
        assert!((select_f32(true, 10.0, 20.0) - 10.0).abs() < 1e-6);
        assert!((select_f32(false, 10.0, 20.0) - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min_f32(1.0, 2.0), 1.0);
        assert_eq!(max_f32(1.0, 2.0), 2.0);
        assert_eq!(max_f32(-3.0, -4.0), -3.0);
    }

    #[test]
    fn test_clamp() {
        assert!((clamp_f32(0.5, 0.0, 1.0) - 0.5).abs() < 1e-6);
        assert!((clamp_f32(-1.0, 0.0, 1.0) - 0.0).abs() < 1e-6);
        assert!((clamp_f32(2.0, 0.0, 1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn max_rgb_keeps_brighter_channel() {
        let mut dst = [0.3, 0.9, 0.1];
        max_rgb_in_place(&mut dst, [2.0, 0.4, 0.1]);
        assert_eq!(dst, [2.0, 0.9, 0.1]);
    }

    #[test]
    fn max_rgb_on_buffer_slice() {
        let mut buf = vec![0.0f32; 6];
        max_rgb_in_place(&mut buf[3..6], [0.5, 0.5, 0.5]);
        assert_eq!(buf, vec![0.0, 0.0, 0.0, 0.5, 0.5, 0.5]);
    }
}

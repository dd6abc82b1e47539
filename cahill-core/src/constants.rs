#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const PI: f64 = 3.141592653589793238462643;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const HALF_PI: f64 = 1.5707963267948966192313216;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const QUARTER_PI: f64 = 0.7853981633974483096156608;

/// π/6, the half-angle of an octant's apex wedge after the 2/3 angle compression.
pub const PI_OVER_6: f64 = PI / 6.0;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const TWOPI: f64 = 6.283185307179586476925287;

#[allow(clippy::excessive_precision)]
pub const DEG_TO_RAD: f64 = 1.745329251994329576923691e-2;

#[allow(clippy::excessive_precision)]
pub const RAD_TO_DEG: f64 = 57.29577951308232087679815;

/// √3/2: altitude of an equilateral triangle with unit side.
#[allow(clippy::excessive_precision)]
pub const HALF_ROOT_3: f64 = 0.8660254037844386467637232;

pub const DEGREES_IN_CIRCLE: f64 = 360.0;

pub const MAX_LATITUDE_DEG: f64 = 90.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_constants() {
        assert_eq!(HALF_ROOT_3, 3.0_f64.sqrt() / 2.0);
        assert!((PI_OVER_6 - std::f64::consts::FRAC_PI_6).abs() < 1e-15);
        assert_eq!(TWOPI, 2.0 * PI);
        assert_eq!(HALF_PI, PI / 2.0);
        assert_eq!(QUARTER_PI, PI / 4.0);
    }
}

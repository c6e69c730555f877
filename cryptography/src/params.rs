//! Compiled-in domain parameters.

use gostec_math::domain::Domain;
use num_bigint::BigInt;

/// Field prime of the standard 256-bit parameter set.
const P: &str = "57896044625259982827082014024491516445703215213774687456785671200359045162371";

/// Constant coefficient of the curve equation (the linear coefficient is
/// `-1`).
const B: &str = "53956679838042162451108292176931772631109916272820066466458395232513766926866";

/// Base point coordinates.
const PX: &str = "12933162268009944794066590054824622037560826430730236852169234350278155715869";
const PY: &str = "18786030474197088418858017573086015439132081546303111294023901101650919011383";

/// Prime order of the base point.
const Q: &str = "28948022312629991413541007012245758222850495633896873081323396140811733708403";

fn int(digits: &str) -> BigInt {
    digits.parse().expect("hardcoded decimal constant")
}

/// The standard 256-bit signing group: curve `y^2 = x^3 - x + b` over
/// `GF(p)`, with a base point of prime order `q` (cofactor 2).
///
/// Validation of compiled-in constants cannot fail; the panic path exists
/// only to catch a corrupted source tree at first use.
pub fn standard() -> Domain {
    Domain::new(
        int(P),
        BigInt::from(-1),
        int(B),
        int(PX),
        int(PY),
        int(Q),
    )
    .expect("standard parameters are valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn test_standard_domain_validates() {
        let domain = standard();
        assert!(domain.curve().contains(domain.base()));
        assert_eq!(domain.curve().a(), &BigInt::from(-1));
        // q fits the residue-transport precondition: -q < a <= 0.
        assert!(domain.curve().a() > &(-domain.q()));
    }

    #[test]
    fn test_standard_base_has_order_q() {
        let domain = standard();
        assert!(domain.curve().mul(domain.q(), domain.base()).is_infinity());
        assert!(!domain
            .curve()
            .mul(&BigInt::from(2), domain.base())
            .is_infinity());
    }
}

//! Network Parameter Tests
//!
//! Tests for S/Y/Z/H/A/T access, native-type conversion and renormalization
//! on networks loaded from Touchstone files.

mod common;

use anyhow::Result;
use approx::assert_relative_eq;
use common::{assert_sweep_eq, c, data_path};
use ndarray::{arr2, Array2};
use num_complex::Complex64;
use rfnet_core::frequency::{Frequency, FrequencyUnit};
use rfnet_core::math::{convert, ConversionError, LinalgError};
use rfnet_core::network::{Network, NetworkError};
use rfnet_core::{Config, MatrixLayout, ParameterType};

fn load(name: &str) -> Network {
    Network::from_touchstone(data_path(name)).unwrap_or_else(|e| panic!("failed to load {name}: {e}"))
}

// ============================================================================
// Parameter access
// ============================================================================

#[test]
fn test_s_is_stored_data() -> Result<()> {
    let ntwk = load("line_ma.s2p");
    assert_eq!(ntwk.param(), ParameterType::S);
    assert_eq!(ntwk.s()?, ntwk.data().to_vec());
    Ok(())
}

#[test]
fn test_network_matches_matrix_conversion() -> Result<()> {
    let ntwk = load("line_ma.s2p");
    let z0 = ntwk.z0().to_vec();

    for kind in ParameterType::ALL {
        let per_point: Vec<_> = ntwk
            .data()
            .iter()
            .map(|m| convert(m, ParameterType::S, kind, &z0))
            .collect::<Result<_, _>>()?;
        assert_sweep_eq(&ntwk.to_param(kind)?, &per_point, 1e-12);
    }
    Ok(())
}

#[test]
fn test_short_has_zero_impedance() -> Result<()> {
    let ntwk = load("short.s1p");
    for z in ntwk.z()? {
        assert_relative_eq!(z[[0, 0]].norm(), 0.0, epsilon = 1e-12);
    }
    Ok(())
}

#[test]
fn test_short_has_no_admittance() {
    let ntwk = load("short.s1p");
    assert!(matches!(
        ntwk.y(),
        Err(NetworkError::Conversion(ConversionError::Linalg(
            LinalgError::Singular
        )))
    ));
}

#[test]
fn test_impedance_file_to_s() -> Result<()> {
    let ntwk = load("impedance_z.s1p");
    assert_eq!(ntwk.param(), ParameterType::Z);
    assert_eq!(ntwk.nfreq(), 2);

    // 25 ohm load on a 50 ohm port
    for s in ntwk.s()? {
        assert_relative_eq!(s[[0, 0]].re, -1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(s[[0, 0]].im, 0.0, epsilon = 1e-12);
    }
    Ok(())
}

#[test]
fn test_z_times_y_is_identity() -> Result<()> {
    let ntwk = load("coupler.s3p");
    let eye = Array2::<Complex64>::eye(3);
    for (z, y) in ntwk.z()?.iter().zip(ntwk.y()?) {
        for (x, e) in z.dot(&y).iter().zip(eye.iter()) {
            assert!((x - e).norm() < 1e-9);
        }
    }
    Ok(())
}

// ============================================================================
// Port-count restrictions
// ============================================================================

#[test]
fn test_three_port_rejects_two_port_types() {
    let ntwk = load("coupler.s3p");
    for kind in [ParameterType::A, ParameterType::H] {
        assert!(matches!(
            ntwk.to_param(kind),
            Err(NetworkError::Conversion(ConversionError::TwoPortOnly {
                nports: 3,
                ..
            }))
        ));
    }
    assert!(matches!(
        ntwk.t(),
        Err(NetworkError::Conversion(ConversionError::OddPortCount(3)))
    ));
}

#[test]
fn test_four_port_t_parameters() -> Result<()> {
    let ntwk = load("diff_pair.s4p");
    let t = ntwk.convert_to(ParameterType::T)?;
    assert_eq!(t.param(), ParameterType::T);
    assert_eq!(t.data()[0].dim(), (4, 4));
    assert_sweep_eq(&t.s()?, ntwk.data(), 1e-9);

    assert!(matches!(
        ntwk.a(),
        Err(NetworkError::Conversion(ConversionError::TwoPortOnly { .. }))
    ));
    Ok(())
}

// ============================================================================
// Native type conversion
// ============================================================================

#[test]
fn test_convert_to_keeps_metadata() -> Result<()> {
    let ntwk = load("amplifier_noise.s2p");
    let a = ntwk.convert_to(ParameterType::A)?;

    assert_eq!(a.param(), ParameterType::A);
    assert_eq!(a.name, ntwk.name);
    assert_eq!(a.comments, ntwk.comments);
    assert_eq!(a.port_names, vec!["1", "2"]);
    assert_eq!(a.frequency(), ntwk.frequency());
    assert!(a.noise().is_some());
    assert_sweep_eq(&a.s()?, ntwk.data(), 1e-9);
    Ok(())
}

#[test]
fn test_chain_through_every_type() -> Result<()> {
    let ntwk = load("line_db.s2p");
    let mut current = ntwk.clone();
    for kind in [
        ParameterType::Z,
        ParameterType::H,
        ParameterType::T,
        ParameterType::Y,
        ParameterType::A,
        ParameterType::S,
    ] {
        current = current.convert_to(kind)?;
    }
    assert_sweep_eq(current.data(), ntwk.data(), 1e-9);
    Ok(())
}

#[test]
fn test_column_major_output() -> Result<()> {
    let path = data_path("coupler.s3p");
    let config = Config::default().with_layout(MatrixLayout::ColumnMajor);
    let ntwk = Network::from_touchstone_with_config(&path, config)?;

    let z = ntwk.z()?;
    assert!(z.iter().all(|m| !m.is_standard_layout()));
    assert_sweep_eq(&z, &load("coupler.s3p").z()?, 1e-12);
    Ok(())
}

#[test]
fn test_sequential_and_parallel_agree() -> Result<()> {
    let path = data_path("diff_pair.s4p");
    let seq = Network::from_touchstone_with_config(&path, Config::default().with_parallel(false))?;
    let par = Network::from_touchstone_with_config(&path, Config::default().with_parallel(true))?;
    assert_eq!(seq.y()?, par.y()?);
    Ok(())
}

// ============================================================================
// Renormalization
// ============================================================================

#[test]
fn test_renormalize_to_load_impedance() -> Result<()> {
    let ntwk = load("impedance_z.s1p").convert_to(ParameterType::S)?;
    let matched = ntwk.renormalize(&[c(25.0, 0.0)])?;

    assert_eq!(matched.z0(), &[c(25.0, 0.0)]);
    for s in matched.data() {
        assert!(s[[0, 0]].norm() < 1e-12);
    }
    Ok(())
}

#[test]
fn test_renormalize_impedance_network_only_moves_reference() -> Result<()> {
    let ntwk = load("impedance_z.s1p");
    let renorm = ntwk.renormalize(&[c(25.0, 0.0)])?;
    assert_eq!(renorm.param(), ParameterType::Z);
    assert_eq!(renorm.data(), ntwk.data());
    assert!(renorm.s()?[0][[0, 0]].norm() < 1e-12);
    Ok(())
}

#[test]
fn test_renormalize_t_matches_s() -> Result<()> {
    let ntwk = load("diff_pair.s4p");
    let z0_new = [c(75.0, 0.0), c(75.0, 0.0), c(25.0, 0.0), c(25.0, 0.0)];

    let via_s = ntwk.renormalize(&z0_new)?;
    let via_t = ntwk.convert_to(ParameterType::T)?.renormalize(&z0_new)?;
    assert_eq!(via_t.param(), ParameterType::T);
    assert_sweep_eq(&via_t.s()?, via_s.data(), 1e-9);
    Ok(())
}

#[test]
fn test_renormalize_wrong_length() {
    let ntwk = load("line_ma.s2p");
    assert!(matches!(
        ntwk.renormalize(&[c(50.0, 0.0); 3]),
        Err(NetworkError::Conversion(ConversionError::ImpedanceMismatch {
            expected: 2,
            got: 3
        }))
    ));
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_network_from_matrices() -> Result<()> {
    let freq = Frequency::from_f(vec![1.0], FrequencyUnit::GHz);
    let data = vec![arr2(&[[c(0.0, 0.0), c(1.0, 0.0)], [c(1.0, 0.0), c(0.0, 0.0)]])];
    let thru = Network::new(freq, data, vec![c(50.0, 0.0); 2], ParameterType::S)?;

    let a = thru.a()?;
    assert_relative_eq!(a[0][[0, 0]].re, 1.0, epsilon = 1e-12);
    assert_relative_eq!(a[0][[0, 1]].norm(), 0.0, epsilon = 1e-12);
    assert_relative_eq!(a[0][[1, 0]].norm(), 0.0, epsilon = 1e-12);
    assert_relative_eq!(a[0][[1, 1]].re, 1.0, epsilon = 1e-12);
    Ok(())
}

/// Integration tests for range parsing and algebra
///
/// These tests drive the public factory API with constraints as they show
/// up in real advisories and package manifests.

use vrange::{Range, RangeError, Version, VersionError, VersionFactory};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn range(input: &str) -> Range {
    init_logging();
    VersionFactory::lenient().get_range(input).unwrap()
}

fn version(input: &str) -> Version {
    VersionFactory::lenient().get_version(input).unwrap()
}

fn strict(input: &str) -> Result<Range, RangeError> {
    VersionFactory::strict().get_range(input)
}

#[test]
fn test_version_rendering() {
    let cases = [
        ("1.2.3alpha", "1.2.3-alpha"),
        ("1.2.3-rc+build.1", "1.2.3-rc+build.1"),
        ("1", "1.0.0"),
        ("1.2.3.4", "1.2.3.4"),
        ("demo-1.2.3", "1.2.3"),
        ("5demo-1.2.3", "1.2.3"),
        ("5demo-1.2.3alpha", "1.2.3-alpha"),
        ("5.", "5.0.0"),
        ("5.5.5.5.", "5.5.5.5"),
        ("named", "named"),
        ("1.2.3 &", "1.2.3"),
        ("1.0.2-v20150114", "1.0.2-v20150114"),
        ("4.3.2.Final", "4.3.2"),
        ("= 4.3.2.Final", "4.3.2"),
        ("2.5.6.SEC01", "2.5.6-SEC01"),
        ("4.3.2-Final | 4.3.1-GA", "4.3.1 | 4.3.2"),
    ];
    for (input, expected) in cases {
        assert_eq!(range(input).to_string(), expected, "input {:?}", input);
    }
}

#[test]
fn test_round_trip_of_canonical_versions() {
    for canonical in ["1.2.3", "0.0.1", "1.2.3-beta", "1.2.3.4", "10.20.30-rc.1"] {
        assert_eq!(version(canonical).to_string(), canonical);
    }
}

#[test]
fn test_stability_alias_equivalence() {
    assert_eq!(version("4.3.2"), version("4.3.2.Final"));
    assert_eq!(version("4.3.2"), version("4.3.2-RELEASE"));
}

#[test]
fn test_comparison_monotonicity() {
    let ordered = ["0.9", "1.0.0-alpha", "1.0.0", "1.0.0.1", "1.2", "1.10", "2.0.0"];
    for pair in ordered.windows(2) {
        let (a, b) = (version(pair[0]), version(pair[1]));
        assert!(a < b, "{} < {}", a, b);
        assert!(range(&format!(">{}", pair[0])).contains(&b));
        assert!(!range(&format!("<{}", pair[0])).contains(&b));
    }
}

#[test]
fn test_set_membership() {
    let r = range("1.2.5,1.2.6,1.2.8");
    assert!(r.contains(&version("1.2.6")));
    assert!(!r.contains(&version("1.2.7")));
}

#[test]
fn test_maven_parsing() {
    let cases = [
        ("[4.3.2.1_beta]", "4.3.2.1-beta"),
        ("[4.3beta]", "4.3.0-beta"),
        ("[2.4.0rc1]", "2.4.0-rc1"),
        ("[,4.3.2]", "<=4.3.2"),
        ("(,4.3.2]", "<=4.3.2"),
        ("[4.3.2,]", ">=4.3.2"),
        ("[4.3.2,)", ">=4.3.2"),
        ("(,4.3.2)", "<4.3.2"),
        ("[,4.3.2)", "<4.3.2"),
        ("(4.3.2,)", ">4.3.2"),
        ("(4.3.2,]", ">4.3.2"),
        ("(1.0,2.0)", ">1.0.0 <2.0.0"),
        ("(1.0,2.0],[3.0,4.0)", ">1.0.0 <=2.0.0 | >=3.0.0 <4.0.0"),
        ("[3.2,3.2.8.RELEASE], [4.0,4.0.4.RELEASE]", ">=3.2.0 <=3.2.8 | >=4.0.0 <=4.0.4"),
        ("[2.4-beta,2.4.0-rc1]", ">=2.4.0-beta <=2.4.0-rc1"),
        ("[]", ""),
        ("[-]", ""),
    ];
    for (input, expected) in cases {
        let r = range(input);
        assert_eq!(r.to_string(), expected, "input {:?}", input);
        assert!(r.is_maven_range(), "input {:?}", input);
    }

    assert!(VersionFactory::lenient().get_range("(1.2.19,1.2.19]").is_err());
    assert!(strict("(1.2.19,1.2.19]").is_err());
}

#[test]
fn test_maven_rendering() {
    assert_eq!(range("[1.0,2.0)").to_maven_string(), "[1.0.0,2.0.0)");
    assert_eq!(range(">=2.0.0 <=2.5.3-SP13").to_maven_string(), "[2.0.0,2.5.3-SP13]");

    let union = VersionFactory::lenient()
        .get_range_union([
            ">=2.0.0 <=2.5.3-SP13",
            ">=2.6.0 <=2.6.1 | >=2.7.0 <=2.7.1-Beta2",
        ])
        .unwrap();
    assert_eq!(
        union.to_maven_string(),
        "[2.0.0,2.5.3-SP13],[2.6.0,2.6.1],[2.7.0,2.7.1-Beta2]"
    );
    assert_eq!(range("[]").to_maven_string(), "");
    assert!(VersionFactory::lenient().is_maven_range("(1.0,2.0],[3.0,4.0)"));
    assert!(!VersionFactory::lenient().is_maven_range("~> 1.9"));
}

#[test]
fn test_pessimistic_ranges() {
    assert_eq!(range("~> 1.9.3.484").to_string(), ">=1.9.3.484 <1.9.4.0");
    assert_eq!(range("~> 1.9.3").to_string(), ">=1.9.3 <1.10.0");
    assert_eq!(range("~> 1.9").to_string(), ">=1.9.0 <2.0.0");
    assert!(matches!(
        VersionFactory::lenient().get_range("~> 1"),
        Err(RangeError::Version(_))
    ));
}

#[test]
fn test_npm_ranges() {
    assert_eq!(range("~1.2.3").to_string(), ">=1.2.3 <1.3.0");
    assert_eq!(range("~1.2").maximum().unwrap().unwrap().to_string(), "1.3.0");
    assert_eq!(range("~1").maximum().unwrap().unwrap().to_string(), "2.0.0");
    assert_eq!(range("~0").maximum().unwrap().unwrap().to_string(), "1.0.0");
    assert_eq!(range("^1.2.3").maximum().unwrap().unwrap().to_string(), "2.0.0");
    assert_eq!(range("^0.2.3").maximum().unwrap().unwrap().to_string(), "0.3.0");
    assert_eq!(range("^0.0.3").maximum().unwrap().unwrap().to_string(), "0.0.4");
    assert_eq!(range("*").to_string(), ">=0.0.0");
    assert_eq!(range("1.x").to_string(), ">=1.0.0 <2.0.0");
    assert_eq!(range("1.2.x").to_string(), ">=1.2.0 <1.3.0");
}

#[test]
fn test_inversion() {
    assert_eq!(range(">1.0").invert().unwrap().to_string(), "<=1.0.0");
    assert_eq!(
        range("~> 1.9.3.484").invert().unwrap().to_string(),
        "<1.9.3.484 | >=1.9.4.0"
    );
    assert_eq!(range("~> 4.2.5, >= 4.2.5.1").to_string(), ">=4.2.5.1 <4.3.0");
    assert_eq!(
        range("<1.0.0 | >2.0.0").invert().unwrap().to_string(),
        ">=1.0.0 <=2.0.0"
    );
    assert!(range("1.2.3").invert().is_err());
}

#[test]
fn test_inversion_of_longer_unions() {
    let r = range("<1.0 | >2.0 <3.0 | >4.0");
    let inverted = r.invert().unwrap();
    assert_eq!(inverted.to_string(), "(>=1.0.0 (<=2.0.0 | >=3.0.0)) <=4.0.0");

    let back = inverted.invert().unwrap();
    assert_eq!(back.to_string(), "<1.0.0 | >2.0.0 <3.0.0 | >4.0.0");
    for sample in ["0.5", "1.0", "1.5", "2.0", "2.5", "3.0", "3.5", "4.0", "4.0.1", "5"] {
        let sample = version(sample);
        assert_ne!(r.contains(&sample), inverted.contains(&sample), "{}", sample);
        assert_eq!(r.contains(&sample), back.contains(&sample), "{}", sample);
    }
}

#[test]
fn test_double_inversion() {
    let samples: Vec<Version> = ["0.1", "1.0", "1.0.0-rc1", "1.5", "2.0", "2.0.1", "3"]
        .iter()
        .map(|v| version(v))
        .collect();
    for input in ["<1.0", "<=2.0", ">1.0", ">=2.0", ">=1.0 <2.0"] {
        let r = range(input);
        let back = r.invert().unwrap().invert().unwrap();
        for sample in &samples {
            assert_eq!(r.contains(sample), back.contains(sample), "{} on {}", input, sample);
        }
    }
}

#[test]
fn test_merge() {
    let factory = VersionFactory::lenient();
    let merged = factory.merge(&[range(">1.0.0"), range("<2.0.0 | >3.0.0")]).unwrap();
    assert_eq!(merged.to_string(), ">1.0.0 <2.0.0 | >3.0.0");

    let merged = factory
        .merge(&[range("<2.0.0 | >3.0.0"), range("<4.0.0 | >5.0.0")])
        .unwrap();
    assert_eq!(merged.to_string(), "<2.0.0 | >3.0.0 <4.0.0 | >5.0.0");

    let merged = factory.merge(&[range("<4.0.0 | >5.0.0"), range("<6.0.0")]).unwrap();
    assert_eq!(merged.to_string(), "<4.0.0 | >5.0.0 <6.0.0");

    let merged = factory
        .merge(&[
            range(">1.0.0"),
            range("<2.0.0 | >3.0.0"),
            range("<4.0.0 | >5.0.0"),
            range("<6.0.0"),
        ])
        .unwrap();
    assert_eq!(merged.to_string(), ">1.0.0 <2.0.0 | >3.0.0 <4.0.0 | >5.0.0 <6.0.0");

    assert!(matches!(
        factory.merge(&[range(">1.0.0")]),
        Err(RangeError::MergePrecondition(_))
    ));
}

#[test]
fn test_complex_inversion() {
    let inverted: Vec<Range> = ["~> 1.9.3.484", "~> 2.0.0.353", ">= 2.1.0-preview.2"]
        .iter()
        .map(|r| range(r).invert().unwrap())
        .collect();
    let merged = VersionFactory::lenient().merge(&inverted).unwrap();
    assert_eq!(
        merged.to_string(),
        "<1.9.3.484 | >=1.9.4.0 <2.0.0.353 | >=2.0.1.0 <2.1.0-preview.2"
    );
    assert!(merged.contains(&version("1.9.5")));
    assert!(!merged.contains(&version("1.9.3.500")));
    assert!(!merged.contains(&version("2.1.0")));
}

#[test]
fn test_intersection() {
    let set = range("1.2.5,1.2.6,1.2.8");
    assert!(set.intersects(&range("1.2.6,1.2.9")));
    assert!(range("<1.5").intersects(&set));
    assert!(range(">1.2").intersects(&set));
    assert!(range("<1.5").intersects(&range(">1.2")));
    assert!(range(">=4.2.5").intersects(&range(">=4.2.5.1")));
    assert!(range("(>1.2.5 & <1.3) | (>2.2.5 & <2.3)").intersects(&range("(>1.2.9 & <1.4) | >5")));
    assert!(!range("<1.0").intersects(&set));
}

#[test]
fn test_contains() {
    assert!(range("(>1.2.5 & <1.3)").contains(&version("1.2.5.99")));
    assert!(range("<=1.2.5.0").contains(&version("1.2.5")));
    assert!(range(">=1.2.5.0").contains(&version("1.2.5")));
    assert!(range("<1.2.5-rc5").contains(&version("1.2.5-rc4")));
    assert!(!range("<1.2.5-rc5").contains(&version("1.2.5-rc6")));
    assert!(!range("<1.8.0.9").contains(&version("2.3.2")));
    assert_eq!(
        range(">=2.5.0 <=2.5.6 || 2.5.6.SEC01 || 2.5.6.SEC02 || 2.5.7 || >=3.0.0 <3.0.3").to_string(),
        ">=2.5.0 <=2.5.6 | 2.5.6-SEC01 | 2.5.6-SEC02 | 2.5.7 | >=3.0.0 <3.0.3"
    );
    assert!(range("<1.10.10").contains_range(&range(">=1.10.1 <1.10.10")));
    assert_eq!(range("<1.4.1 >=0.4.3").to_string(), ">=0.4.3 <1.4.1");
    assert_eq!(range(">=0.10.0, <0.10.2").to_string(), ">=0.10.0 <0.10.2");
}

#[test]
fn test_scenario() {
    let r = range("(>1.2.5 & <1.3) | (>2.2.5 & <2.3)");
    assert!(r.contains(&version("1.2.6")));
    assert!(r.contains(&version("2.2.6")));
    assert!(!r.contains(&version("1.2.5")));
    assert!(!r.contains(&version("1.3.1")));
    assert!(!r.contains(&version("2.4")));
    assert!(!r.contains(&version("bob")));
}

#[test]
fn test_range_ordering() {
    assert!(range("<1.0") < range(">0.5"));
    assert!(range(">1.0") < range(">=1.5 <2.0"));
    assert!(range(">1.0 | >5.0") < range(">2.0"));
    assert_eq!(range(">=1.0 <2.0"), range("<2.0 >=1.0"));
}

#[test]
fn test_simplified() {
    let r = range(">=1.0 <2.0 | >=3.0 <4.0");
    assert_eq!(r.simplified().to_string(), ">=3.0.0 <4.0.0");
}

#[test]
fn test_strict_rejections() {
    for input in [
        ">=1.2.3 <1.1.1",
        "[named]",
        "(named]",
        "named&version",
        "named=version",
        "named>version",
        "named<version",
        "1.2.3[zounds]",
        "named version",
        "named[wow]",
        "named(zounds)",
        ">=3.0.0 <=3.9.1 =3.10.2",
    ] {
        assert!(strict(input).is_err(), "strict mode accepted {:?}", input);
    }
}

#[test]
fn test_strict_named_versions() {
    for input in ["namedVersion", "named-version", "named.version", "named+version"] {
        let r = strict(input).unwrap();
        assert_eq!(r.to_string(), input);
        assert!(r.has_named());
        assert!(!r.has_errors());
    }
}

#[test]
fn test_lenient_recovery() {
    let r = range("1.2.3[zounds]");
    assert_eq!(r.to_string(), "1.2.3");
    assert!(r.has_errors());

    let r = range("named(zounds)");
    assert!(r.has_errors());
    assert_eq!(r.to_string(), "named(zounds)");

    let r = range("named version");
    assert!(r.has_errors());
    assert_eq!(r.to_string(), "");

    let r = range("1.2.3");
    assert!(!r.has_errors());
}

#[test]
fn test_range_union() {
    let union = VersionFactory::lenient()
        .get_range_union(["<1.0", ">2.0", "1.5"])
        .unwrap();
    assert_eq!(union.to_string(), "<1.0.0 | 1.5.0 | >2.0.0");
    assert!(union.contains(&version("1.5")));
    assert!(union.maximum().is_err());
    assert_eq!(union.minimum().unwrap().to_string(), "0.0.0");

    let empty: [&str; 0] = [];
    let union = VersionFactory::lenient().get_range_union(empty).unwrap();
    assert_eq!(union.to_string(), "");
}

#[test]
fn test_upper_bounds_at_component_limit() {
    for input in [
        "~> 1.18446744073709551615.0",
        "^18446744073709551615.0.0",
        "~1.18446744073709551615",
        "18446744073709551615.x",
    ] {
        for factory in [VersionFactory::lenient(), VersionFactory::strict()] {
            assert!(
                matches!(
                    factory.get_range(input),
                    Err(RangeError::Version(VersionError::ComponentOverflow(_)))
                ),
                "input {:?}",
                input
            );
        }
    }
    assert_eq!(
        range("<=18446744073709551615.0.0").to_string(),
        "<=18446744073709551615.0.0"
    );
}

#[test]
fn test_over_wide_numbers_never_become_named() {
    for input in ["20150114123456789012345", ">=1.0 <99999999999999999999999"] {
        for factory in [VersionFactory::lenient(), VersionFactory::strict()] {
            assert!(
                matches!(
                    factory.get_range(input),
                    Err(RangeError::Version(VersionError::ComponentOverflow(_)))
                ),
                "input {:?}",
                input
            );
        }
    }
    assert!(VersionFactory::lenient().get_version("20150114123456789012345").is_err());
}

#[test]
fn test_satisfies() {
    let v = version("1.2.6");
    assert!(v.satisfies("(>1.2.5 & <1.3) | (>2.2.5 & <2.3)").unwrap());
    assert!(!v.satisfies("[2.0,3.0)").unwrap());
    assert!(v.satisfies("~> 1.2").unwrap());
    assert!(v.is_stable());
    assert!(!version("1.2.6-rc1").is_stable());
}

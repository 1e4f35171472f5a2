use compound_interest_core::{
    calculate, format_result, solve, solve_with_policy, Field, RawInputs, SolveError,
    SolveRequest, SolverPolicy,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn knowns(pairs: &[(Field, &str)]) -> RawInputs {
    pairs
        .iter()
        .fold(RawInputs::default(), |acc, (f, v)| acc.with(*f, *v))
}

fn assert_relative(got: Decimal, want: Decimal, rel: Decimal) {
    let tol = want.abs() * rel;
    assert!(
        (got - want).abs() <= tol,
        "expected {want} within {rel} relative, got {got}"
    );
}

// ===========================================================================
// Reference values
// ===========================================================================

#[test]
fn test_future_value_reference() {
    // 1000 x 1.05^10 = 1628.894626777442
    let fv = solve(
        Field::FutureValue,
        &knowns(&[(Field::Principal, "1000"), (Field::Rate, "5"), (Field::Years, "10")]),
    )
    .unwrap();
    assert!((fv - dec!(1628.89)).abs() < dec!(0.01), "got {fv}");
    assert_eq!(format_result(Field::FutureValue, fv), "1629");
}

#[test]
fn test_principal_reference() {
    let p = solve(
        Field::Principal,
        &knowns(&[
            (Field::FutureValue, "1628.89"),
            (Field::Rate, "5"),
            (Field::Years, "10"),
        ]),
    )
    .unwrap();
    assert!((p - dec!(1000)).abs() < dec!(0.01), "got {p}");
    assert_eq!(format_result(Field::Principal, p), "1000");
}

#[test]
fn test_rate_reference() {
    let r = solve(
        Field::Rate,
        &knowns(&[
            (Field::Principal, "1000"),
            (Field::FutureValue, "1628.89"),
            (Field::Years, "10"),
        ]),
    )
    .unwrap();
    assert!((r - dec!(5)).abs() < dec!(0.001), "got {r}");
    assert_eq!(format_result(Field::Rate, r), "5.00");
}

#[test]
fn test_years_reference() {
    let t = solve(
        Field::Years,
        &knowns(&[
            (Field::Principal, "1000"),
            (Field::Rate, "5"),
            (Field::FutureValue, "1628.89"),
        ]),
    )
    .unwrap();
    assert!((t - dec!(10)).abs() < dec!(0.001), "got {t}");
    assert_eq!(format_result(Field::Years, t), "10.0");
}

#[test]
fn test_rule_of_72_doubling() {
    // Doubling at 8% takes ~9.006 years
    let t = solve(
        Field::Years,
        &knowns(&[
            (Field::Principal, "500"),
            (Field::Rate, "8"),
            (Field::FutureValue, "1000"),
        ]),
    )
    .unwrap();
    assert!((t - dec!(9.006)).abs() < dec!(0.001), "got {t}");
}

#[test]
fn test_fractional_years() {
    // 2500 x 1.035^7.5
    let fv = solve(
        Field::FutureValue,
        &knowns(&[
            (Field::Principal, "2500"),
            (Field::Rate, "3.5"),
            (Field::Years, "7.5"),
        ]),
    )
    .unwrap();
    assert!((fv - dec!(3235.88)).abs() < dec!(0.01), "got {fv}");
}

// ===========================================================================
// Round trips
// ===========================================================================

const CASES: [(&str, &str, &str); 6] = [
    ("1000", "5", "10"),
    ("250000", "0.75", "30"),
    ("12.34", "99.5", "2.5"),
    ("1", "100", "20"),
    ("987654.32", "12.25", "0.5"),
    ("50", "3", "60"),
];

#[test]
fn test_round_trip_principal() {
    let rel = dec!(0.000001);
    for (p, r, y) in CASES {
        let fv = solve(
            Field::FutureValue,
            &knowns(&[(Field::Principal, p), (Field::Rate, r), (Field::Years, y)]),
        )
        .unwrap()
        .to_string();
        let back = solve(
            Field::Principal,
            &knowns(&[
                (Field::FutureValue, fv.as_str()),
                (Field::Rate, r),
                (Field::Years, y),
            ]),
        )
        .unwrap();
        assert_relative(back, p.parse().unwrap(), rel);
    }
}

#[test]
fn test_round_trip_rate() {
    let rel = dec!(0.000001);
    for (p, r, y) in CASES {
        let fv = solve(
            Field::FutureValue,
            &knowns(&[(Field::Principal, p), (Field::Rate, r), (Field::Years, y)]),
        )
        .unwrap()
        .to_string();
        let back = solve(
            Field::Rate,
            &knowns(&[
                (Field::Principal, p),
                (Field::FutureValue, fv.as_str()),
                (Field::Years, y),
            ]),
        )
        .unwrap();
        assert_relative(back, r.parse().unwrap(), rel);
    }
}

#[test]
fn test_round_trip_years() {
    let rel = dec!(0.000001);
    for (p, r, y) in CASES {
        let fv = solve(
            Field::FutureValue,
            &knowns(&[(Field::Principal, p), (Field::Rate, r), (Field::Years, y)]),
        )
        .unwrap()
        .to_string();
        let back = solve(
            Field::Years,
            &knowns(&[
                (Field::Principal, p),
                (Field::Rate, r),
                (Field::FutureValue, fv.as_str()),
            ]),
        )
        .unwrap();
        assert_relative(back, y.parse().unwrap(), rel);
    }
}

// ===========================================================================
// Validation failures
// ===========================================================================

#[test]
fn test_shrinking_value_rejected_for_rate() {
    let err = solve(
        Field::Rate,
        &knowns(&[
            (Field::Principal, "1000"),
            (Field::FutureValue, "500"),
            (Field::Years, "5"),
        ]),
    )
    .unwrap_err();
    assert_eq!(err, SolveError::FutureValueNotGreater);
}

#[test]
fn test_zero_rate_rejected_for_years() {
    let err = solve(
        Field::Years,
        &knowns(&[
            (Field::Principal, "1000"),
            (Field::Rate, "0"),
            (Field::FutureValue, "2000"),
        ]),
    )
    .unwrap_err();
    assert_eq!(err, SolveError::NonPositiveRate);
    assert_eq!(
        err.to_string(),
        "Interest rate must be greater than 0 for time calculations."
    );
}

#[test]
fn test_negative_or_non_numeric_names_the_field() {
    let base = [
        (Field::Principal, "1000"),
        (Field::Rate, "5"),
        (Field::Years, "10"),
    ];
    for (i, (field, _)) in base.iter().enumerate() {
        for bad in ["-1", "abc", "", "  "] {
            let mut pairs = base;
            pairs[i].1 = bad;
            let err = solve(Field::FutureValue, &knowns(&pairs)).unwrap_err();
            assert_eq!(err, SolveError::InvalidInput(*field), "input {bad:?}");
        }
    }
}

#[test]
fn test_invalid_input_message() {
    let err = solve(
        Field::Years,
        &knowns(&[
            (Field::Principal, "1000"),
            (Field::Rate, "5"),
            (Field::FutureValue, "lots"),
        ]),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Please enter a valid positive number for Future Value."
    );
}

#[test]
fn test_rate_of_150_too_high() {
    let raw = knowns(&[
        (Field::Principal, "1000"),
        (Field::Rate, "150"),
        (Field::Years, "10"),
    ]);
    assert_eq!(
        solve(Field::FutureValue, &raw).unwrap_err(),
        SolveError::RateTooHigh
    );

    // Raising the cap admits it
    let policy = SolverPolicy {
        max_rate_percent: Some(dec!(200)),
    };
    let fv = solve_with_policy(Field::FutureValue, &raw, &policy).unwrap();
    // 1000 x 2.5^10 = 9536743.1640625
    assert!((fv - dec!(9536743.1640625)).abs() < dec!(0.0001), "got {fv}");

    assert!(solve_with_policy(Field::FutureValue, &raw, &SolverPolicy::uncapped()).is_ok());
}

#[test]
fn test_zero_years_rejected() {
    let err = solve(
        Field::FutureValue,
        &knowns(&[(Field::Principal, "1000"), (Field::Rate, "5"), (Field::Years, "0")]),
    )
    .unwrap_err();
    assert_eq!(err, SolveError::NonPositiveYears);
}

// ===========================================================================
// Full request
// ===========================================================================

#[test]
fn test_calculate_from_json_request() {
    let request: SolveRequest = serde_json::from_str(
        r#"{
            "target": "futureValue",
            "principal": 1000,
            "rate": "5",
            "years": 10,
            "policy": { "maxRatePercent": "50" }
        }"#,
    )
    .unwrap();
    let out = calculate(&request).unwrap();
    assert_eq!(out.result.target, Field::FutureValue);
    assert_eq!(out.result.display, "1629");
    assert_eq!(out.result.rounded, dec!(1629));
    assert_eq!(out.result.inputs.rate, Some(dec!(0.05)));
    assert!(out.warnings.is_empty());

    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["result"]["target"], "futureValue");
    assert_eq!(json["result"]["display"], "1629");
}

#[test]
fn test_calculate_respects_request_policy() {
    let request: SolveRequest = serde_json::from_str(
        r#"{"target": "principal", "futureValue": "2000", "rate": "60", "years": "3",
            "policy": { "max_rate_percent": "50" }}"#,
    )
    .unwrap();
    assert_eq!(calculate(&request).unwrap_err(), SolveError::RateTooHigh);
}

#[test]
fn test_calculate_accepts_camel_case_policy() {
    let request: SolveRequest = serde_json::from_str(
        r#"{"target": "futureValue", "principal": "100", "rate": "150", "years": "1",
            "policy": { "maxRatePercent": "200" }}"#,
    )
    .unwrap();
    let out = calculate(&request).unwrap();
    assert_eq!(out.result.display, "250");
    assert_eq!(out.assumptions["policy"]["maxRatePercent"], "200");
}

#[test]
fn test_digit_separators_rejected() {
    let err = solve(
        Field::FutureValue,
        &knowns(&[
            (Field::Principal, "1_000"),
            (Field::Rate, "5"),
            (Field::Years, "10"),
        ]),
    )
    .unwrap_err();
    assert_eq!(err, SolveError::InvalidInput(Field::Principal));
}

//! Cross-driver contract tests.
//!
//! Both backends implement one interface; these tests pin the behavior the
//! rest of the library relies on, and that the two drivers agree wherever a
//! consumer could observe a difference.

use pretty_assertions::assert_eq;

use datumorbit_core::{
    builtin_drivers, DateDriver, DateFields, DateInput, FormatType, Part, Span,
};

const VALID_FIXTURES: &[&str] = &[
    "1991-07-13",
    "1991-07-13T09:05:02.040",
    "2024-02-29",
    "2024-12-31T23:59:59",
    "1970-01-01",
];

const INVALID_FIXTURES: &[&str] = &["", "not-a-date", "2023-02-30", "1991-13-01", "13/07/1991"];

fn drivers() -> Vec<Box<dyn DateDriver>> {
    builtin_drivers()
}

#[test]
fn invalid_input_returns_none_from_every_operation() {
    for driver in drivers() {
        for fixture in INVALID_FIXTURES {
            let input = DateInput::from(*fixture);
            let valid = DateInput::from("1991-07-13");

            assert!(driver.normalize(&input).is_none(), "{}: {:?}", driver.id(), fixture);
            assert!(driver.format(&input, None).is_none());
            assert!(driver.set(&input, &DateFields::default()).is_none());
            assert!(driver.add(&input, &Span::days(1)).is_none());
            assert!(driver.subtract(&input, &Span::days(1)).is_none());
            assert!(driver.days_in_month(&input).is_none());
            assert!(driver.weekday(&input).is_none());
            for part in Part::ALL {
                assert!(driver.start_of(&input, part).is_none());
                assert!(driver.end_of(&input, part).is_none());
                assert!(driver.get(&input, part).is_none());
                assert!(driver.diff(&input, &valid, part).is_none());
                assert!(driver.diff(&valid, &input, part).is_none());
            }
        }
    }
}

#[test]
fn normalize_is_idempotent() {
    for driver in drivers() {
        for fixture in VALID_FIXTURES {
            let once = driver.normalize(&DateInput::from(*fixture)).unwrap();
            let twice = driver.normalize(&once.into()).unwrap();
            assert_eq!(once, twice, "{}: {}", driver.id(), fixture);
        }
    }
}

#[test]
fn formatting_now_never_fails() {
    for driver in drivers() {
        let now = driver.now();
        assert!(driver.format(&now.into(), None).is_some(), "{}", driver.id());
        let display = driver.format_string(FormatType::Display);
        assert!(driver.format(&now.into(), Some(display)).is_some());
    }
}

#[test]
fn weekday_equals_get_weekdays() {
    for driver in drivers() {
        for fixture in VALID_FIXTURES {
            let input = DateInput::from(*fixture);
            assert_eq!(
                driver.weekday(&input).map(i64::from),
                driver.get(&input, Part::Weekdays),
                "{}: {}",
                driver.id(),
                fixture
            );
        }
    }
}

#[test]
fn diff_is_antisymmetric() {
    let pairs = [
        ("1991-07-13", "1991-08-14"),
        ("2024-02-29", "2023-02-28"),
        ("1970-01-01", "2024-12-31T23:59:59"),
    ];
    for driver in drivers() {
        for (a, b) in pairs {
            let a = DateInput::from(a);
            let b = DateInput::from(b);
            for part in Part::ALL {
                let forward = driver.diff(&a, &b, part).unwrap();
                let backward = driver.diff(&b, &a, part).unwrap();
                assert_eq!(forward, -backward, "{}: {:?}", driver.id(), part);
            }
        }
    }
}

#[test]
fn display_format_matches_reference_rendering() {
    for driver in drivers() {
        let input = DateInput::from("1991-07-13");
        let display = driver.format_string(FormatType::Display);
        assert_eq!(
            driver.format(&input, Some(display)).unwrap(),
            "07/13/1991",
            "{}",
            driver.id()
        );
    }
}

#[test]
fn month_boundaries_stay_in_month() {
    for driver in drivers() {
        for fixture in VALID_FIXTURES {
            let input = DateInput::from(*fixture);
            let month = driver.get(&input, Part::Months).unwrap();
            let year = driver.get(&input, Part::Years).unwrap();

            let start = driver.start_of(&input, Part::Months).unwrap();
            let end = driver.end_of(&start.into(), Part::Months).unwrap();

            assert_eq!(i64::from(start.month()), month, "{}", driver.id());
            assert_eq!(i64::from(end.month()), month);
            assert_eq!(i64::from(start.year()), year);
            assert_eq!(i64::from(end.year()), year);
            assert_eq!(start.day(), 1);
            assert_eq!(u64::from(end.day()), u64::from(driver.days_in_month(&input).unwrap()));
        }
    }
}

#[test]
fn drivers_agree_on_every_observable_operation() {
    let chrono = datumorbit_core::ChronoDriver;
    let time = datumorbit_core::TimeDriver;

    let millis_fixtures: &[i64] = &[0, 679_363_200_000, 1_703_456_789_000];

    let mut inputs: Vec<DateInput> = VALID_FIXTURES
        .iter()
        .map(|fixture| DateInput::from(*fixture))
        .collect();
    inputs.extend(millis_fixtures.iter().map(|millis| DateInput::from(*millis)));

    for input in &inputs {
        assert_eq!(
            chrono.normalize(input),
            time.normalize(input),
            "normalize: {:?}",
            input
        );
        assert_eq!(chrono.days_in_month(input), time.days_in_month(input));
        assert_eq!(chrono.weekday(input), time.weekday(input));

        for part in Part::ALL {
            assert_eq!(
                chrono.start_of(input, part),
                time.start_of(input, part),
                "start_of {:?}: {:?}",
                part,
                input
            );
            assert_eq!(
                chrono.end_of(input, part),
                time.end_of(input, part),
                "end_of {:?}: {:?}",
                part,
                input
            );
            assert_eq!(
                chrono.get(input, part),
                time.get(input, part),
                "get {:?}: {:?}",
                part,
                input
            );
        }

        for format_type in FormatType::ALL {
            assert_eq!(
                chrono.format(input, Some(chrono.format_string(format_type))),
                time.format(input, Some(time.format_string(format_type))),
                "format {:?}: {:?}",
                format_type,
                input
            );
        }
    }

    let spans = [
        Span::days(45),
        Span::months(1),
        Span::years(-3),
        "1d12h".parse::<Span>().unwrap(),
        "-P2M".parse::<Span>().unwrap(),
    ];
    for input in &inputs {
        for span in &spans {
            assert_eq!(
                chrono.add(input, span),
                time.add(input, span),
                "add {:?}: {:?}",
                span,
                input
            );
        }
    }

    for a in &inputs {
        for b in &inputs {
            for part in Part::ALL {
                assert_eq!(
                    chrono.diff(a, b, part),
                    time.diff(a, b, part),
                    "diff {:?}: {:?} vs {:?}",
                    part,
                    a,
                    b
                );
            }
        }
    }
}

#[test]
fn set_agrees_across_drivers() {
    let chrono = datumorbit_core::ChronoDriver;
    let time = datumorbit_core::TimeDriver;
    let input = DateInput::from("1991-07-13T09:05:02.040");

    let cases = [
        DateFields {
            weekday: Some(0),
            ..DateFields::default()
        },
        DateFields {
            day: Some(1),
            hour: Some(12),
            ..DateFields::default()
        },
        DateFields {
            year: Some(2024),
            month: Some(2),
            day: Some(29),
            ..DateFields::default()
        },
        // Out of range: both reject.
        DateFields {
            month: Some(13),
            ..DateFields::default()
        },
    ];

    for fields in &cases {
        assert_eq!(
            chrono.set(&input, fields),
            time.set(&input, fields),
            "set {:?}",
            fields
        );
    }
}

#[test]
fn first_day_of_week_is_monday_everywhere() {
    for driver in drivers() {
        assert_eq!(driver.first_day_of_week(), 0, "{}", driver.id());
    }
}

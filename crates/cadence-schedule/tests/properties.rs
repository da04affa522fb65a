//! Property tests for expansion and staffing invariants.

use cadence_schedule::{
    AvailabilityWindow, DayOfWeek, Frequency, JobWindow, Occurrence, RecurrencePattern, ShiftSet,
    StaffId, StaffMember, StaffRoster, Verdict, can_assign, expand,
};
use chrono::{Days, NaiveDate, NaiveTime};
use proptest::prelude::*;

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    // 2000-01-01 plus up to ~40 years
    (0u64..15_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .and_then(|base| base.checked_add_days(Days::new(offset)))
            .unwrap()
    })
}

fn arb_days() -> impl Strategy<Value = Vec<DayOfWeek>> {
    prop::collection::vec(0u8..7, 1..=7).prop_map(|indices| {
        indices
            .into_iter()
            .filter_map(DayOfWeek::from_index)
            .collect()
    })
}

fn arb_frequency() -> impl Strategy<Value = Frequency> {
    prop_oneof![
        Just(Frequency::Daily),
        Just(Frequency::Weekly),
        Just(Frequency::Biweekly),
        Just(Frequency::Monthly),
        Just(Frequency::Custom),
    ]
}

prop_compose! {
    fn arb_pattern()(
        frequency in arb_frequency(),
        interval in 1u32..5,
        days in arb_days(),
        day_of_month in 1u8..=31,
        start_date in arb_date(),
        end_offset in prop::option::of(0u64..400),
        skip_offsets in prop::collection::vec(0u64..120, 0..6),
        max_occurrences in prop::option::of(1u32..40),
    ) -> RecurrencePattern {
        let mut pattern = RecurrencePattern::new(frequency, start_date)
            .with_interval(interval)
            .with_days_of_week(days);
        pattern.day_of_month = Some(day_of_month);
        pattern.end_date = end_offset.and_then(|offset| start_date.checked_add_days(Days::new(offset)));
        pattern.skip_dates = skip_offsets
            .into_iter()
            .filter_map(|offset| start_date.checked_add_days(Days::new(offset)))
            .collect();
        pattern.max_occurrences = max_occurrences;
        pattern
    }
}

proptest! {
    #[test]
    fn expansion_is_ordered_and_bounded(pattern in arb_pattern(), count in 0usize..60) {
        let occurrences = expand(&pattern, count).unwrap();

        prop_assert!(occurrences.len() <= count);
        for occurrence in &occurrences {
            prop_assert!(occurrence.date >= pattern.start_date);
            if let Some(end) = pattern.end_date {
                prop_assert!(occurrence.date <= end);
            }
            prop_assert_eq!(occurrence.skipped, pattern.skip_dates.contains(&occurrence.date));
        }
        for pair in occurrences.windows(2) {
            prop_assert!(pair[0].date < pair[1].date);
            prop_assert_eq!(pair[0].sequence_index + 1, pair[1].sequence_index);
        }
        if let Some(first) = occurrences.first() {
            prop_assert_eq!(first.sequence_index, 0);
        }
    }

    #[test]
    fn cap_limits_length(pattern in arb_pattern(), cap in 1u32..20, extra in 1usize..40) {
        let capped = pattern.with_max_occurrences(cap);
        let requested = usize::try_from(cap).unwrap() + extra;

        let occurrences = expand(&capped, requested).unwrap();
        prop_assert!(occurrences.len() <= usize::try_from(cap).unwrap());
    }

    #[test]
    fn expansion_is_deterministic(pattern in arb_pattern(), count in 0usize..40) {
        prop_assert_eq!(expand(&pattern, count).unwrap(), expand(&pattern, count).unwrap());
    }

    #[test]
    fn shorter_expansion_is_prefix(pattern in arb_pattern(), short in 0usize..20, extra in 0usize..20) {
        let long = expand(&pattern, short + extra).unwrap();
        let prefix = expand(&pattern, short).unwrap();
        prop_assert_eq!(&long[..prefix.len()], prefix.as_slice());
    }

    #[test]
    fn weekly_dates_fall_on_selected_days(pattern in arb_pattern(), count in 0usize..40) {
        prop_assume!(matches!(pattern.frequency, Frequency::Weekly | Frequency::Biweekly));
        for occurrence in expand(&pattern, count).unwrap() {
            prop_assert!(pattern.days_of_week.contains(&occurrence.weekday()));
        }
    }

    #[test]
    fn re_adding_skip_date_changes_nothing(pattern in arb_pattern(), count in 0usize..40) {
        let Some(existing) = pattern.skip_dates.iter().next().copied() else {
            return Ok(());
        };
        let again = pattern.clone().with_skip_date(existing);
        prop_assert_eq!(expand(&pattern, count).unwrap(), expand(&again, count).unwrap());
    }

    #[test]
    fn skipped_occurrence_always_assignable(date in arb_date(), index in 0u32..100) {
        let roster = StaffRoster::new([StaffMember::new(
            StaffId::from("ana"),
            [AvailabilityWindow::new(
                DayOfWeek::Monday,
                NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            )
            .unwrap()],
        )
        .unwrap()])
        .unwrap();
        let occurrence = Occurrence { date, sequence_index: index, skipped: true };
        let job = JobWindow::new(
            NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
        )
        .unwrap();

        let verdict = can_assign(
            &occurrence,
            &[StaffId::from("ana"), StaffId::from("ghost")],
            &roster,
            &ShiftSet::default(),
            job,
        );
        prop_assert_eq!(verdict, Verdict::Assignable);
    }
}

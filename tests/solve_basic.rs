#![forbid(unsafe_code)]
use chrono::{Datelike, NaiveDate, Weekday};
use permanence::{
    is_weekend_day,
    model::Person,
    scheduler::{SchedError, Scheduler, SolveStatus},
};
use std::collections::BTreeMap;

/// Effectif de référence : deux personnes par jour attitré (lundi à jeudi),
/// condition nécessaire pour couvrir chaque jour de semaine à deux.
fn full_roster() -> Vec<Person> {
    vec![
        Person::new("ana", Weekday::Mon),
        Person::new("bruno", Weekday::Mon),
        Person::new("clara", Weekday::Tue),
        Person::new("david", Weekday::Tue),
        Person::new("emma", Weekday::Wed),
        Person::new("felix", Weekday::Wed),
        Person::new("gina", Weekday::Thu),
        Person::new("hugo", Weekday::Thu),
    ]
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

fn assignments_per_date(people: &[Person]) -> BTreeMap<NaiveDate, Vec<String>> {
    let mut per_date: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
    for person in people {
        for &date in &person.assigned_shifts {
            per_date.entry(date).or_default().push(person.name.clone());
        }
    }
    per_date
}

#[test]
fn every_day_has_exactly_two_assignees() {
    let result = Scheduler::new(full_roster(), monday(), 1)
        .assign_days()
        .unwrap();

    let per_date = assignments_per_date(&result.people);
    assert_eq!(per_date.len(), 7);
    for (date, names) in &per_date {
        assert_eq!(names.len(), 2, "coverage broken on {date}");
    }
    assert_eq!(result.diagnostics.status, SolveStatus::Optimal);
}

#[test]
fn assignments_respect_eligibility_and_rest() {
    let result = Scheduler::new(full_roster(), monday(), 1)
        .assign_days()
        .unwrap();

    for person in &result.people {
        for &date in &person.assigned_shifts {
            let weekday = date.weekday();
            assert!(
                weekday == person.working_day || is_weekend_day(weekday),
                "{} assigned outside working day and weekend: {date}",
                person.name
            );
        }
        // Repos : au moins deux jours entre deux gardes.
        for pair in person.assigned_shifts.windows(2) {
            let gap = (pair[1] - pair[0]).num_days();
            assert!(gap > 2, "{} rests only {gap} day(s)", person.name);
        }
    }
}

#[test]
fn designated_weekday_people_work_it() {
    let result = Scheduler::new(full_roster(), monday(), 1)
        .assign_days()
        .unwrap();

    // Lundi n'a que deux personnes éligibles : elles sont forcées.
    let per_date = assignments_per_date(&result.people);
    let mut on_monday = per_date.get(&monday()).cloned().unwrap_or_default();
    on_monday.sort();
    assert_eq!(on_monday, vec!["ana".to_string(), "bruno".to_string()]);
}

#[test]
fn totals_stay_inside_tolerance_band() {
    let people = full_roster();
    let headcount = people.len() as i64;
    let scheduler = Scheduler::new(people, monday(), 1);
    let tolerance = i64::from(scheduler.options().tolerance);
    let weekend_tolerance = i64::from(scheduler.options().weekend_tolerance);
    let result = scheduler.assign_days().unwrap();

    let expected = 7 * 2 / headcount;
    let expected_weekend = 3 * 2 / headcount;
    for person in &result.people {
        let total = person.assigned_shifts.len() as i64;
        assert!(total >= (expected - tolerance).max(0) && total <= expected + tolerance);

        let weekend_total =
            i64::from(person.fridays_count + person.saturdays_count + person.sundays_count);
        assert!(weekend_total <= expected_weekend + weekend_tolerance);
    }
}

#[test]
fn incompatible_pair_never_shares_a_day() {
    let mut people = full_roster();
    // Déclarée dans un seul sens ; la relation est traitée symétriquement.
    people[0].incompatible_with.insert("clara".to_string());

    let result = Scheduler::new(people, monday(), 2).assign_days().unwrap();
    for (date, names) in assignments_per_date(&result.people) {
        let clash = names.contains(&"ana".to_string()) && names.contains(&"clara".to_string());
        assert!(!clash, "ana and clara share {date}");
    }
}

#[test]
fn two_week_horizon_still_covers_every_day() {
    let result = Scheduler::new(full_roster(), monday(), 2)
        .assign_days()
        .unwrap();

    let per_date = assignments_per_date(&result.people);
    assert_eq!(per_date.len(), 14);
    for names in per_date.values() {
        assert_eq!(names.len(), 2);
    }
}

#[test]
fn weekend_overlap_across_weeks_is_minimized() {
    let result = Scheduler::new(full_roster(), monday(), 2)
        .assign_days()
        .unwrap();

    // Le repos limite chacun à un jour de week-end par semaine : il faut 6
    // personnes distinctes par week-end, donc au moins 6 + 6 − 8 = 4
    // personnes travaillent les deux week-ends. La pénalité de week-ends
    // consécutifs doit ramener le chevauchement à ce minimum.
    let second_week = monday() + chrono::Duration::days(7);
    let both_weekends = result
        .people
        .iter()
        .filter(|p| {
            let week_of = |date: &NaiveDate| *date >= second_week;
            let weekend_in = |second: bool| {
                p.assigned_shifts
                    .iter()
                    .any(|d| is_weekend_day(d.weekday()) && week_of(d) == second)
            };
            weekend_in(false) && weekend_in(true)
        })
        .count();
    assert_eq!(both_weekends, 4);

    // Avec un chevauchement de 4, les 12 créneaux de week-end se répartissent
    // forcément en quatre personnes à 2 et quatre à 1 ; ajoutés aux deux
    // jours attitrés de chacun, l'écart max−min des totaux tombe à 1.
    let totals: Vec<usize> = result
        .people
        .iter()
        .map(|p| p.assigned_shifts.len())
        .collect();
    let max = totals.iter().max().unwrap();
    let min = totals.iter().min().unwrap();
    assert_eq!(max - min, 1);
}

#[test]
fn resolving_twice_yields_identical_assignments() {
    let first = Scheduler::new(full_roster(), monday(), 1)
        .assign_days()
        .unwrap();
    let second = Scheduler::new(full_roster(), monday(), 1)
        .assign_days()
        .unwrap();

    for (a, b) in first.people.iter().zip(&second.people) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.assigned_shifts, b.assigned_shifts);
    }
}

#[test]
fn single_person_roster_is_infeasible() {
    let err = Scheduler::new(vec![Person::new("solo", Weekday::Mon)], monday(), 1)
        .assign_days()
        .unwrap_err();

    assert!(err.diagnostics().is_some());
    match err {
        SchedError::NoFeasibleSolution(diagnostics) => {
            assert_eq!(diagnostics.status, SolveStatus::Infeasible);
        }
        other => panic!("expected NoFeasibleSolution, got {other}"),
    }
}

#[test]
fn empty_inputs_are_rejected() {
    assert!(matches!(
        Scheduler::new(Vec::new(), monday(), 1).assign_days(),
        Err(SchedError::NoPeople)
    ));
    assert!(matches!(
        Scheduler::new(full_roster(), monday(), 0).assign_days(),
        Err(SchedError::EmptyHorizon)
    ));
}

#[test]
fn absences_are_respected() {
    let mut people = full_roster();
    // gina indisponible le dimanche 12 : elle ne doit pas y être assignée.
    let sunday = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();
    people[6].absence_days.insert(sunday);

    let result = Scheduler::new(people, monday(), 1).assign_days().unwrap();
    let gina = result.people.iter().find(|p| p.name == "gina").unwrap();
    assert!(!gina.assigned_shifts.contains(&sunday));
}

use rand::SeedableRng;
use rand::rngs::SmallRng;
use u_timetable::TimetableError;
use u_timetable::ga::{
    GaConfig, GaRunner, MutationType, Termination, Timetable, TimetableProblem,
};
use u_timetable::models::{MeetingPosition, TimetableRequest, WeekLayout};
use u_timetable::report::{TimetableGrid, TimetableKpi};

fn department(layout: WeekLayout) -> TimetableProblem {
    let mut req = TimetableRequest::new().with_layout(layout);
    let smith = req.add_instructor("Smith");
    let jones = req.add_instructor("Jones");
    let lee = req.add_instructor("Lee");
    req.add_course("CS-101", 28, smith);
    req.add_course("CS-102", 25, smith);
    req.add_course("CS-201", 18, jones);
    req.add_course("CS-202", 22, jones);
    req.add_course("CS-301", 12, lee);
    req.add_course("CS-302", 15, lee);
    req.add_classroom("SIMP-120", 30);
    req.add_classroom("SIMP-200", 25);
    req.add_classroom("SIMP-300", 20);
    TimetableProblem::new(req).unwrap()
}

#[test]
fn single_room_single_course_scores_one() {
    let mut req = TimetableRequest::new();
    let a = req.add_instructor("A");
    req.add_course("CS-1", 20, a);
    req.add_classroom("SIMP-120", 30);
    let problem = TimetableProblem::new(req).unwrap();

    let result = GaRunner::run(&problem, &GaConfig::default().with_seed(42)).unwrap();
    assert_eq!(result.best_fitness, 1.0);
    assert_eq!(result.termination, Termination::Converged);
    assert!(result.population.iter().all(|t| t.fitness() == Some(1.0)));
}

#[test]
fn shared_instructor_same_slot_scores_minus_one() {
    let mut req = TimetableRequest::new();
    let a = req.add_instructor("A");
    req.add_course("CS-1", 20, a);
    req.add_course("CS-2", 20, a);
    req.add_classroom("SIMP-120", 30);
    req.add_classroom("SIMP-200", 30);
    let problem = TimetableProblem::new(req).unwrap();

    let mut t = Timetable::empty(&problem);
    let monday_first = MeetingPosition { pattern: 0, offset: 0 };
    assert!(t.assign(&problem.layout, 0, monday_first, 0));
    assert!(t.assign(&problem.layout, 1, monday_first, 1));
    // two rooms used, one (instructor, slot) conflict
    assert_eq!(problem.breakdown(&t).instructor_conflicts, 1);
    assert_eq!(problem.evaluate(&mut t), 0.5 - 1.0);

    // the same course pair in one room, different slots, is clean
    let mut fixed = Timetable::empty(&problem);
    fixed.assign(&problem.layout, 0, monday_first, 0);
    fixed.assign(&problem.layout, 0, MeetingPosition { pattern: 0, offset: 1 }, 1);
    assert_eq!(problem.evaluate(&mut fixed), 1.0);
}

#[test]
fn missing_course_scores_minus_one() {
    let mut req = TimetableRequest::new();
    let a = req.add_instructor("A");
    req.add_course("CS-1", 20, a);
    req.add_classroom("SIMP-120", 30);
    let problem = TimetableProblem::new(req).unwrap();

    let mut t = Timetable::empty(&problem);
    assert_eq!(problem.evaluate(&mut t), -1.0);
}

#[test]
fn missing_course_costs_exactly_one() {
    let mut req = TimetableRequest::new();
    let a = req.add_instructor("A");
    let b = req.add_instructor("B");
    req.add_course("CS-1", 20, a);
    req.add_course("CS-2", 20, b);
    req.add_classroom("SIMP-120", 30);
    let problem = TimetableProblem::new(req).unwrap();

    let mut partial = Timetable::empty(&problem);
    partial.assign(&problem.layout, 0, MeetingPosition { pattern: 0, offset: 0 }, 0);
    let mut full = partial.clone();
    full.assign(&problem.layout, 0, MeetingPosition { pattern: 0, offset: 1 }, 1);

    assert_eq!(problem.evaluate(&mut full) - problem.evaluate(&mut partial), 1.0);
}

#[test]
fn oversized_course_is_never_placed() {
    let mut req = TimetableRequest::new();
    let a = req.add_instructor("A");
    req.add_course("CS-1", 20, a);
    req.add_course("BIG-1", 500, a);
    req.add_classroom("SIMP-120", 30);
    let problem = TimetableProblem::new(req).unwrap();

    let config = GaConfig::default().with_seed(5).with_max_generations(50);
    let result = GaRunner::run(&problem, &config).unwrap();
    let kpi = TimetableKpi::calculate(&problem, &result.best);
    assert_eq!(kpi.unplaced_courses, vec!["BIG-1".to_string()]);
    assert_eq!(result.best_fitness, 0.0);
}

#[test]
fn department_search_finds_feasible_timetable() {
    let problem = department(WeekLayout::two_day());
    let config = GaConfig::default()
        .with_seed(2024)
        .with_population_size(30)
        .with_max_generations(300);
    let result = GaRunner::run(&problem, &config).unwrap();

    let kpi = TimetableKpi::calculate(&problem, &result.best);
    assert!(kpi.is_feasible(), "best: {kpi:?}");
    assert!(result.best_fitness > 0.0);
    assert!(result.population.windows(2).all(|w| w[0].fitness() >= w[1].fitness()));

    let grid = TimetableGrid::new(&problem, &result.best).to_string();
    for name in ["CS-101", "CS-102", "CS-201", "CS-202", "CS-301", "CS-302"] {
        assert!(grid.contains(name));
    }
}

#[test]
fn five_day_meetings_stay_whole() {
    let problem = department(WeekLayout::five_day());
    let config = GaConfig::default()
        .with_seed(11)
        .with_max_generations(60)
        .with_convergence_window(0);

    for mutation in [MutationType::Consolidate, MutationType::SlotSwap] {
        let result =
            GaRunner::run(&problem, &config.clone().with_mutation_type(mutation)).unwrap();
        for genome in &result.population {
            for room in 0..genome.rooms.len() {
                let occupied = genome.rooms[room].occupied_count();
                let in_meetings: usize = genome
                    .meetings_in(&problem.layout, room)
                    .iter()
                    .map(|(p, _)| problem.layout.patterns[p.pattern].groups.len())
                    .sum();
                assert_eq!(occupied, in_meetings, "{mutation:?} split a meeting");
            }
        }
    }
}

#[test]
fn seeded_search_is_reproducible() {
    let problem = department(WeekLayout::two_day());
    let config = GaConfig::default().with_seed(77).with_max_generations(40);
    let a = GaRunner::run(&problem, &config).unwrap();
    let b = GaRunner::run(&problem, &config).unwrap();
    assert_eq!(a.best, b.best);
    assert_eq!(a.mean_fitness_history, b.mean_fitness_history);
}

#[test]
fn random_genomes_respect_capacity() {
    let problem = department(WeekLayout::two_day());
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..50 {
        let genome = problem.create_individual(10, &mut rng);
        for room in &genome.rooms {
            let seats = problem.seats(room.classroom);
            for course in room.slots.iter().flatten() {
                assert!(problem.courses[*course].enrolled <= seats);
            }
        }
    }
}

#[test]
fn invalid_request_is_rejected() {
    let mut req = TimetableRequest::new();
    let a = req.add_instructor("A");
    req.add_course("CS-1", 20, a);
    req.add_course("CS-2", 20, 9);
    req.add_classroom("SIMP-120", 30);
    req.add_classroom("SIMP-120", 40);

    match TimetableProblem::new(req) {
        Err(TimetableError::InvalidInput(errors)) => assert_eq!(errors.len(), 2),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn request_loads_from_json() {
    let json = r#"{
        "courses": [{"name": "CS-1", "enrolled": 20, "instructor": 0}],
        "classrooms": [{"name": "SIMP-120", "size": 30}],
        "instructors": [{"name": "A", "courses": [0]}]
    }"#;
    let req: TimetableRequest = serde_json::from_str(json).unwrap();
    assert_eq!(req.layout, WeekLayout::two_day());
    let problem = TimetableProblem::new(req).unwrap();
    assert_eq!(problem.layout.total_slots(), 17);
}

#[test]
fn unlisted_courses_are_rejected_before_scoring() {
    let json = r#"{
        "courses": [
            {"name": "CS-1", "enrolled": 20, "instructor": 0},
            {"name": "CS-2", "enrolled": 20, "instructor": 0}
        ],
        "classrooms": [
            {"name": "SIMP-120", "size": 30},
            {"name": "SIMP-200", "size": 30}
        ],
        "instructors": [{"name": "A"}]
    }"#;
    let mut req: TimetableRequest = serde_json::from_str(json).unwrap();
    assert!(matches!(
        TimetableProblem::new(req.clone()),
        Err(TimetableError::InvalidInput(_))
    ));

    // once the instructor lists both courses, the shared slot is penalized
    req.instructors[0].courses = vec![0, 1];
    let problem = TimetableProblem::new(req).unwrap();
    let mut t = Timetable::empty(&problem);
    let monday_first = MeetingPosition { pattern: 0, offset: 0 };
    t.assign(&problem.layout, 0, monday_first, 0);
    t.assign(&problem.layout, 1, monday_first, 1);
    assert_eq!(problem.breakdown(&t).instructor_conflicts, 1);
    assert_eq!(problem.evaluate(&mut t), -0.5);
}

use depot_dashboard::benchmarks::{BenchmarkSet, BUILTIN_BENCHMARKS};
use depot_dashboard::filter::{depot_names, Quarter, TimePeriod};
use depot_dashboard::format::{parse_display_value, NO_DATA};
use depot_dashboard::output::{render_text, write_csv, write_report_json};
use depot_dashboard::report::{render, RenderOutcome, Selection};
use depot_dashboard::source::{ActivitySource, CsvSource};
use depot_dashboard::types::VarianceFlag;
use std::io::Write;

const HEADER: &str = "id,depot_name,entry_date,category,planned_schedules,total_drivers,Day_weekly_off_per,Day_special_off_per,Day_other_per,Day_leave_absent_per,Day_sick_leave_per,Day_spot_absent_per,Day_double_duty_per,Mon_off_cancellation_per,service_driver_check";

fn fixture() -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, "{}", HEADER).unwrap();
    // Rural depot, three days in January, one in April.
    writeln!(f, "1,Kothur,2024-01-02,Rural,10,22,16.0,24.0,1.5,1.0,1.0,0.5,18.0,0.0,2.0").unwrap();
    writeln!(f, "2,Kothur,2024-01-03,Rural,20,41,16.4,26.0,1.9,3.0,1.0,1.5,14.0,0.0,2.36").unwrap();
    writeln!(f, "3,Kothur,2024-01-03 00:00:00,Rural,15,30,16.2,25.0,1.7,2.0,1.0,1.0,16.0,0.0,2.18").unwrap();
    writeln!(f, "4,Kothur,2024-04-10,Rural,12,25,13.0,25.0,1.7,2.0,2.0,1.0,16.0,0.5,2.18").unwrap();
    writeln!(f, "5,Kothur,garbage,Rural,99,99,99,99,99,99,99,99,99,99,99").unwrap();
    // Depot without a known category.
    writeln!(f, "6,Midhani,2024-01-05,Hill,8,16,20.0,30.0,2.0,5.0,3.0,3.0,9.0,1.0,3.0").unwrap();
    f.flush().unwrap();
    f
}

fn table(outcome: RenderOutcome) -> Box<depot_dashboard::report::DepotReport> {
    match outcome {
        RenderOutcome::Table(report) => report,
        RenderOutcome::NoData => panic!("expected a table"),
    }
}

#[test]
fn monthly_rural_report_end_to_end() {
    let f = fixture();
    let records = CsvSource::new(f.path()).fetch_all().unwrap();
    assert_eq!(depot_names(&records), vec!["Kothur", "Midhani"]);

    let selection = Selection {
        depot: "Kothur".into(),
        period: TimePeriod::monthly(2024, 1).unwrap(),
    };
    let report = table(render(&records, &selection, &BUILTIN_BENCHMARKS));

    assert_eq!(report.context.days_considered, 2);
    assert_eq!(report.cards.planned_schedules, 45);
    assert_eq!(report.cards.total_drivers, 93);
    assert_eq!(report.cards.drivers_per_schedule, 2.07);

    let weekly = report.display.iter().find(|d| d.metric == "Weekly Off (%)").unwrap();
    assert_eq!(weekly.value, "16.2%");
    assert_eq!(weekly.benchmark, "14.0%");
    assert_eq!(weekly.variance, "+2.2%");
    assert_eq!(weekly.variance_flag, VarianceFlag::Adverse);

    let sick = report.display.iter().find(|d| d.metric == "Sick Leave (%)").unwrap();
    assert_eq!(sick.variance, "-1.0%");
    assert_eq!(sick.variance_flag, VarianceFlag::Favorable);

    let off = report.display.iter().find(|d| d.metric == "Off Cancellation (%)").unwrap();
    assert_eq!(off.variance, "+0.0%");
    assert_eq!(off.variance_flag, VarianceFlag::Neutral);

    let planned = &report.display[0];
    assert_eq!(planned.metric, "Planned Schedules");
    assert_eq!(planned.value, "45");
    assert!(planned.variance.is_empty());

    assert_eq!(parse_display_value(&weekly.value), Some(16.2));

    let text = render_text(&RenderOutcome::Table(report));
    assert!(text.contains("Productivity Ratios for Kothur"));
    assert!(text.contains("Category: Rural  |  Days Considered: 2"));
    assert!(text.contains("yellow = Benchmark"));
}

#[test]
fn quarterly_and_yearly_agree() {
    let f = fixture();
    let records = CsvSource::new(f.path()).fetch_all().unwrap();
    let planned = |period: TimePeriod| -> i64 {
        let sel = Selection { depot: "Kothur".into(), period };
        match render(&records, &sel, &BUILTIN_BENCHMARKS) {
            RenderOutcome::Table(r) => r.cards.planned_schedules,
            RenderOutcome::NoData => 0,
        }
    };
    let by_quarter: i64 = Quarter::ALL
        .iter()
        .map(|q| planned(TimePeriod::quarterly(2024, *q)))
        .sum();
    assert_eq!(by_quarter, planned(TimePeriod::Yearly(2024)));
    assert_eq!(by_quarter, 57);
}

#[test]
fn unknown_category_and_no_data() {
    let f = fixture();
    let records = CsvSource::new(f.path()).fetch_all().unwrap();

    let hill = table(render(
        &records,
        &Selection { depot: "Midhani".into(), period: TimePeriod::Yearly(2024) },
        &BenchmarkSet::builtin(),
    ));
    assert!(hill.rows.iter().all(|r| r.benchmark.is_none() && r.variance.is_none()));

    let none = render(
        &records,
        &Selection { depot: "Kothur".into(), period: TimePeriod::Yearly(2019) },
        &BenchmarkSet::builtin(),
    );
    assert!(matches!(none, RenderOutcome::NoData));
    assert_eq!(render_text(&none).matches(NO_DATA).count(), 1);
}

#[test]
fn exports_csv_and_json() {
    let f = fixture();
    let records = CsvSource::new(f.path()).fetch_all().unwrap();
    let report = table(render(
        &records,
        &Selection { depot: "Kothur".into(), period: TimePeriod::Yearly(2024) },
        &BUILTIN_BENCHMARKS,
    ));

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("metrics.csv");
    let json_path = dir.path().join("report.json");
    write_csv(&csv_path, &report.display).unwrap();
    write_report_json(&json_path, &report).unwrap();

    let csv_text = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv_text.starts_with("Metric,Benchmark,Value,Variance,Status,BenchmarkMarker"));
    assert_eq!(csv_text.lines().count(), 12);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["depot"], "Kothur");
    assert_eq!(json["metrics"].as_array().unwrap().len(), 11);
    assert_eq!(json["cards"]["planned_schedules"], 57);
}

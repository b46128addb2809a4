use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use habitmap_analytics::summary;
use habitmap_store::{Habit, HabitLog, MoodLog};

fn fixture(habit_count: usize, days: u32) -> (Vec<Habit>, Vec<HabitLog>, Vec<MoodLog>) {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
    let habits: Vec<Habit> = (0..habit_count)
        .map(|i| Habit {
            id: format!("h{i}"),
            user_id: "u1".into(),
            name: format!("Habit {i}"),
            color: "#a8b5a1".into(),
        })
        .collect();
    let mut habit_logs = Vec::new();
    let mut mood_logs = Vec::new();
    for offset in 0..days {
        let date = (start + chrono::Duration::days(offset as i64))
            .format("%Y-%m-%d")
            .to_string();
        for habit in &habits {
            habit_logs.push(HabitLog {
                id: format!("{}-{date}", habit.id),
                habit_id: habit.id.clone(),
                date: date.clone(),
                completed: offset % 3 != 0,
            });
        }
        mood_logs.push(MoodLog {
            date,
            mood_level: 1 + (offset % 5) as i64,
            emoji: "\u{1F610}".into(),
            note: None,
        });
    }
    (habits, habit_logs, mood_logs)
}

fn bench_compose_summary(c: &mut Criterion) {
    let (habits, habit_logs, mood_logs) = fixture(20, 90);
    let today = NaiveDate::from_ymd_opt(2024, 3, 30).expect("date");
    c.bench_function("compose_summary_20_habits_90_days", |b| {
        b.iter(|| {
            summary::compose(&habits, &habit_logs, &mood_logs, today, 30).expect("summary")
        })
    });
}

criterion_group!(benches, bench_compose_summary);
criterion_main!(benches);

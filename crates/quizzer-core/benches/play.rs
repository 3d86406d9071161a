use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizzer_core::model::Quiz;
use quizzer_core::play::PlaySession;

fn make_pool(n: i64) -> Vec<Quiz> {
    let now = Utc::now();
    (1..=n)
        .map(|id| Quiz {
            id,
            question: format!("Question number {id}"),
            answer: format!("Answer {id}"),
            created_at: now,
            updated_at: now,
        })
        .collect()
}

fn bench_full_game(c: &mut Criterion) {
    let mut group = c.benchmark_group("play_full_game");
    for size in [10, 100, 1000] {
        let pool = make_pool(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &pool, |b, pool| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| {
                let mut session = PlaySession::new(pool.clone());
                while let Some(quiz) = session.draw(&mut rng) {
                    let answer = quiz.answer.clone();
                    session.answer(&quiz, &answer);
                }
                black_box(session.outcome())
            });
        });
    }
    group.finish();
}

fn bench_answer_check(c: &mut Criterion) {
    let pool = make_pool(1);
    let quiz = &pool[0];
    c.bench_function("answer_check", |b| {
        b.iter(|| black_box(quiz.is_answered_by(black_box("  ANSWER 1  "))))
    });
}

criterion_group!(benches, bench_full_game, bench_answer_check);
criterion_main!(benches);

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use markdown_word_count::count_words;
use std::hint::black_box;

/// Generate markdown content of different shapes for benchmarking
fn generate_markdown(paragraphs: usize, pattern: &str) -> String {
    let mut content = String::new();

    for i in 0..paragraphs {
        match pattern {
            "prose" => {
                content.push_str(&format!(
                    "## Section {}\n\nThe quick brown fox jumps over the lazy dog {} times.\n\n",
                    i, i
                ));
            }
            "markup_heavy" => {
                content.push_str(&format!(
                    "<div class=\"note\">< span {} <b>bold</b> and <i>italic</i></div>\n",
                    i
                ));
            }
            "whitespace_heavy" => {
                content.push_str(&format!("word{}  \t  \n\n\n   another\t\t\tone   \n", i));
            }
            _ => unreachable!(),
        }
    }

    content
}

fn bench_count_words(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_words");

    for pattern in ["prose", "markup_heavy", "whitespace_heavy"] {
        for paragraphs in [10, 1_000, 10_000] {
            let content = generate_markdown(paragraphs, pattern);
            group.throughput(Throughput::Bytes(content.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(pattern, paragraphs),
                &content,
                |b, content| b.iter(|| count_words(black_box(content))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_count_words);
criterion_main!(benches);

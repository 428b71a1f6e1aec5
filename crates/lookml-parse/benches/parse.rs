use std::hint::black_box;

use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};

fn benchmark_parser(c: &mut Criterion) {
    let inputs = [
        (
            "Simple",
            r#"
            view: orders {
              dimension: id {
                primary_key: yes
                sql: ${TABLE}.id ;;
              }
            }
            "#,
        ),
        (
            "Medium",
            r#"
            connection: "warehouse"
            include: "*.view.lkml"

            explore: orders {
              join: customers {
                type: left_outer
                relationship: many_to_one
                sql_on: ${orders.customer_id} = ${customers.id} ;;
              }
              always_filter: {
                filters: [orders.status: "complete", orders.created_date: "7 days"]
              }
            }

            view: orders {
              sql_table_name: public.orders ;;

              dimension_group: created {
                type: time
                timeframes: [raw, date, week, month, quarter, year]
                sql: ${TABLE}.created_at ;;
              }

              measure: count {
                type: count
                drill_fields: [id, customers.name]
              }
            }
            "#,
        ),
    ];

    let mut group = c.benchmark_group("Parser Benchmark");

    for (name, code) in inputs {
        group.throughput(Throughput::Bytes(code.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_text", name), code, |b, code| {
            b.iter(|| {
                let document = lookml_parse::parse_text(code);
                black_box(document)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parser);
criterion_main!(benches);

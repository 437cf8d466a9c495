use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rowplan::prelude::*;

fn sample() -> (Schema, SchemeSet) {
    let schema = Schema::new(vec![
        TableDefinition::new("Module", 0x00)
            .with_field("generation", FieldKind::FixedInt { size: 2, flag_type: None })
            .with_field("name", FieldKind::HeapIndex { heap: Heap::String })
            .with_field("mvid", FieldKind::HeapIndex { heap: Heap::Guid }),
        TableDefinition::new("TypeRef", 0x01)
            .with_field("scope", FieldKind::CodedRef { scheme: "ResolutionScope".into() })
            .with_field("name", FieldKind::HeapIndex { heap: Heap::String })
            .with_field("namespace", FieldKind::HeapIndex { heap: Heap::String }),
        TableDefinition::new("TypeDef", 0x02)
            .with_field("flags", FieldKind::FixedInt { size: 4, flag_type: None })
            .with_field("name", FieldKind::HeapIndex { heap: Heap::String })
            .with_field("namespace", FieldKind::HeapIndex { heap: Heap::String })
            .with_field("extends", FieldKind::CodedRef { scheme: "TypeDefOrRef".into() })
            .with_field("fields", FieldKind::RowRange { target: "Field".into() })
            .with_field("methods", FieldKind::RowRange { target: "MethodDef".into() }),
        TableDefinition::new("FieldPtr", 0x03)
            .hidden()
            .with_field("field", FieldKind::TableRef { target: "Field".into() }),
        TableDefinition::new("Field", 0x04)
            .with_field("flags", FieldKind::FixedInt { size: 2, flag_type: None })
            .with_field("name", FieldKind::HeapIndex { heap: Heap::String })
            .with_field("signature", FieldKind::HeapIndex { heap: Heap::Blob }),
        TableDefinition::new("MethodDef", 0x06)
            .with_field("rva", FieldKind::FixedInt { size: 4, flag_type: None })
            .with_field("impl_flags", FieldKind::FixedInt { size: 2, flag_type: None })
            .with_field("flags", FieldKind::FixedInt { size: 2, flag_type: None })
            .with_field("name", FieldKind::HeapIndex { heap: Heap::String })
            .with_field("signature", FieldKind::HeapIndex { heap: Heap::Blob })
            .with_field("params", FieldKind::RowRange { target: "Param".into() }),
        TableDefinition::new("Param", 0x08)
            .with_field("flags", FieldKind::FixedInt { size: 2, flag_type: None })
            .with_field("sequence", FieldKind::FixedInt { size: 2, flag_type: None })
            .with_field("name", FieldKind::HeapIndex { heap: Heap::String }),
    ]);

    let schemes = SchemeSet::new(vec![
        CodeScheme::new("ResolutionScope", vec!["Module".into(), "TypeRef".into()]),
        CodeScheme::new(
            "TypeDefOrRef",
            vec!["TypeDef".into(), "TypeRef".into(), "FieldPtr".into()],
        ),
    ]);

    (schema, schemes)
}

fn bench_generate(c: &mut Criterion) {
    let (schema, schemes) = sample();

    c.bench_function("generate", |b| {
        b.iter(|| generate(black_box(&schema), black_box(&schemes)).unwrap());
    });
}

fn bench_decode(c: &mut Criterion) {
    let (schema, schemes) = sample();
    let artifacts = generate(&schema, &schemes).unwrap();
    let ctx = LayoutContext::new(
        &[("Module", 1), ("TypeRef", 100), ("TypeDef", 80), ("Field", 900), ("MethodDef", 700), ("Param", 1500)],
        false,
        false,
        false,
        &schemes,
    );

    let plan = artifacts.plans.get("TypeDef").unwrap();
    let width = artifacts.widths.get("TypeDef").unwrap().eval(&ctx) as usize;
    let data = vec![0x01u8; width * 64];

    c.bench_function("decode_typedef_rows", |b| {
        b.iter(|| {
            let mut offset = 0;
            for _ in 0..64 {
                black_box(
                    plan.decode(&data, &mut offset, &ctx, &artifacts.dispatch)
                        .unwrap(),
                );
            }
        });
    });
}

criterion_group!(benches, bench_generate, bench_decode);
criterion_main!(benches);

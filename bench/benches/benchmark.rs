use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mybookmarks::import_export::parse_html;
use mybookmarks::query::{available_tags, present, Query};
use mybookmarks::{BookmarkInput, BookmarkStore, MemoryStorage, ViewType};

fn seeded_store(storage: &MemoryStorage, count: usize) -> BookmarkStore<&MemoryStorage> {
    let mut store = BookmarkStore::new(storage);
    store.import_candidates((0..count).map(|i| {
        BookmarkInput::new(
            format!("https://site{}.example.com/page/{}", i % 50, i),
            format!("Title {}", i),
        )
        .with_description("Description")
        .with_tags([format!("tag{}", i % 20), "shared".to_string()])
    }));
    store
}

fn browser_export(count: usize) -> String {
    let mut html = String::from("<!DOCTYPE NETSCAPE-Bookmark-file-1>\n<DL><p>\n");
    for folder in 0..count / 100 {
        html.push_str(&format!("<DT><H3>Folder {}</H3>\n<DL><p>\n", folder));
        for i in 0..100 {
            html.push_str(&format!(
                "<DT><A HREF=\"https://site{}.example.com/{}\" ADD_DATE=\"1700000000\">Link {}</A>\n",
                folder, i, i
            ));
        }
        html.push_str("</DL><p>\n");
    }
    html.push_str("</DL><p>\n");
    html
}

fn bench_store_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_operations");

    group.bench_function("add", |b| {
        b.iter_with_setup(MemoryStorage::new, |storage| {
            let mut store = BookmarkStore::new(&storage);
            store.add(
                BookmarkInput::new("https://example.com", "Example Title")
                    .with_tags(["tag1", "tag2"]),
            );
        });
    });

    group.bench_function("import 1000 candidates", |b| {
        b.iter_with_setup(MemoryStorage::new, |storage| {
            black_box(seeded_store(&storage, 1000).len());
        });
    });

    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let storage = MemoryStorage::new();
    let store = seeded_store(&storage, 1000);
    let mut group = c.benchmark_group("query");

    group.bench_function("present domain view (search)", |b| {
        let query = Query::new().with_search("title 9");
        b.iter(|| black_box(present(store.iter(), ViewType::Domain, &query)));
    });

    group.bench_function("present tag view (two tags)", |b| {
        let query = Query::new().with_tags(["shared", "tag3"]);
        b.iter(|| black_box(present(store.iter(), ViewType::Tag, &query)));
    });

    group.bench_function("available tags", |b| {
        let selected = vec!["tag3".to_string()];
        b.iter(|| black_box(available_tags(store.iter(), &selected)));
    });

    group.finish();
}

fn bench_import(c: &mut Criterion) {
    let html = browser_export(1000);
    c.bench_function("parse_html 1000 anchors", |b| {
        b.iter(|| black_box(parse_html(&html, |_| {})))
    });
}

criterion_group!(benches, bench_store_ops, bench_query, bench_import);
criterion_main!(benches);

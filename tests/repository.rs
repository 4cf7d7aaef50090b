use chrono::Utc;
use diesel::prelude::*;

use catalog_web::domain::blog::NewBlog;
use catalog_web::domain::category::NewCategory;
use catalog_web::domain::product::NewProduct;
use catalog_web::domain::types::{
    BlogBody, BlogTitle, CategoryName, ProductName, ProductPrice, Slug, VersionName,
};
use catalog_web::domain::version::VersionChange;
use catalog_web::repository::errors::RepositoryError;
use catalog_web::repository::{
    BlogReader, BlogWriter, CategoryWriter, DieselRepository, ProductReader, ProductWriter,
};
use catalog_web::schema::versions;

mod common;

fn new_category(name: &str) -> NewCategory {
    let now = Utc::now().naive_utc();
    NewCategory {
        name: CategoryName::new(name).expect("valid category name"),
        created_at: now,
        updated_at: now,
    }
}

fn new_product(category: &catalog_web::domain::category::Category, name: &str) -> NewProduct {
    let now = Utc::now().naive_utc();
    NewProduct {
        category_id: category.id,
        name: ProductName::new(name).expect("valid product name"),
        description: None,
        price: ProductPrice::new(100.0).expect("valid price"),
        created_at: now,
        updated_at: now,
    }
}

fn new_blog(slug: &str) -> NewBlog {
    let now = Utc::now().naive_utc();
    NewBlog {
        title: BlogTitle::new("Первый пост").expect("valid title"),
        slug: Slug::new(slug).expect("valid slug"),
        body: BlogBody::new("Привет, мир!").expect("valid body"),
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn product_reads_back_with_created_versions() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&new_category("Техника"))
        .expect("should create category");
    let product = repo
        .create_product(&new_product(&category, "Смартфон"))
        .expect("should create product");

    let changes = vec![
        VersionChange::Insert {
            name: VersionName::new("16GB").expect("valid version name"),
        },
        VersionChange::Insert {
            name: VersionName::new("32GB").expect("valid version name"),
        },
        VersionChange::Insert {
            name: VersionName::new("64GB").expect("valid version name"),
        },
    ];
    repo.apply_version_changes(product.id, &changes)
        .expect("should apply version changes");

    let versions = repo
        .list_versions(product.id)
        .expect("should list versions");
    assert_eq!(versions.len(), 3);
    assert!(versions.iter().all(|v| v.product_id == product.id));
}

#[test]
fn delete_marker_removes_version_on_update() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&new_category("Техника"))
        .expect("should create category");
    let product = repo
        .create_product(&new_product(&category, "Смартфон"))
        .expect("should create product");
    repo.apply_version_changes(
        product.id,
        &[
            VersionChange::Insert {
                name: VersionName::new("16GB").expect("valid version name"),
            },
            VersionChange::Insert {
                name: VersionName::new("32GB").expect("valid version name"),
            },
        ],
    )
    .expect("should insert versions");

    let versions = repo
        .list_versions(product.id)
        .expect("should list versions");
    let doomed = versions
        .iter()
        .find(|v| v.name.as_str() == "16GB")
        .expect("inserted version should exist");

    repo.apply_version_changes(product.id, &[VersionChange::Delete { id: doomed.id }])
        .expect("should apply delete marker");

    let versions = repo
        .list_versions(product.id)
        .expect("should list versions");
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].name.as_str(), "32GB");
}

#[test]
fn deleting_product_deletes_owned_versions() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&new_category("Техника"))
        .expect("should create category");
    let product = repo
        .create_product(&new_product(&category, "Смартфон"))
        .expect("should create product");
    repo.apply_version_changes(
        product.id,
        &[VersionChange::Insert {
            name: VersionName::new("16GB").expect("valid version name"),
        }],
    )
    .expect("should insert version");

    repo.delete_product(product.id).expect("should delete");

    assert!(
        repo.get_product_by_id(product.id)
            .expect("lookup should succeed")
            .is_none()
    );

    let mut conn = test_db
        .pool()
        .get()
        .expect("should acquire DB connection for verification");
    let remaining: i64 = versions::table
        .filter(versions::product_id.eq(product.id.get()))
        .count()
        .get_result(&mut conn)
        .expect("count should succeed");
    assert_eq!(remaining, 0);
}

#[test]
fn version_changes_do_not_leak_across_products() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&new_category("Техника"))
        .expect("should create category");
    let first = repo
        .create_product(&new_product(&category, "Смартфон"))
        .expect("should create product");
    let second = repo
        .create_product(&new_product(&category, "Ноутбук"))
        .expect("should create product");
    repo.apply_version_changes(
        first.id,
        &[VersionChange::Insert {
            name: VersionName::new("16GB").expect("valid version name"),
        }],
    )
    .expect("should insert version");

    let foreign = repo.list_versions(first.id).expect("should list versions")[0].id;

    // A delete marker scoped to the wrong product must be a no-op.
    let affected = repo
        .apply_version_changes(second.id, &[VersionChange::Delete { id: foreign }])
        .expect("should apply changes");
    assert_eq!(affected, 0);
    assert_eq!(
        repo.list_versions(first.id)
            .expect("should list versions")
            .len(),
        1
    );
}

#[test]
fn consecutive_detail_reads_add_exactly_their_count() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    repo.create_blog(&new_blog("first-post"))
        .expect("should create blog");
    let slug = Slug::new("first-post").expect("valid slug");

    for expected in 1..=5 {
        let blog = repo
            .increment_blog_views(&slug)
            .expect("increment should succeed")
            .expect("blog should exist");
        assert_eq!(blog.num_views.get(), expected);
    }

    let blog = repo
        .get_blog_by_slug(&slug)
        .expect("lookup should succeed")
        .expect("blog should exist");
    assert_eq!(blog.num_views.get(), 5);
}

#[test]
fn increment_of_missing_slug_creates_nothing() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let slug = Slug::new("missing").expect("valid slug");
    let updated = repo
        .increment_blog_views(&slug)
        .expect("increment should succeed");

    assert!(updated.is_none());
    assert!(repo.list_blogs().expect("should list blogs").is_empty());
}

#[test]
fn duplicate_slug_is_a_constraint_violation() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    repo.create_blog(&new_blog("first-post"))
        .expect("should create blog");
    let err = repo
        .create_blog(&new_blog("first-post"))
        .expect_err("duplicate slug should be rejected");

    assert!(matches!(err, RepositoryError::ConstraintViolation(_)));
}

#[test]
fn slug_change_retires_the_old_slug() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    repo.create_blog(&new_blog("first-post"))
        .expect("should create blog");
    let old_slug = Slug::new("first-post").expect("valid slug");

    let update = catalog_web::domain::blog::UpdateBlog {
        title: BlogTitle::new("Первый пост").expect("valid title"),
        slug: Slug::new("renamed-post").expect("valid slug"),
        body: BlogBody::new("Привет, мир!").expect("valid body"),
        updated_at: Utc::now().naive_utc(),
    };
    let affected = repo
        .update_blog(&old_slug, &update)
        .expect("update should succeed");
    assert_eq!(affected, 1);

    assert!(
        repo.get_blog_by_slug(&old_slug)
            .expect("lookup should succeed")
            .is_none()
    );
    let renamed = repo
        .get_blog_by_slug(&Slug::new("renamed-post").expect("valid slug"))
        .expect("lookup should succeed")
        .expect("renamed blog should exist");
    assert_eq!(renamed.num_views.get(), 0);
}

#[test]
fn domain_entities_serialize_transparently_for_templates() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let blog = repo
        .create_blog(&new_blog("first-post"))
        .expect("should create blog");

    let value = serde_json::to_value(&blog).expect("blog should serialize");
    assert_eq!(value["slug"], "first-post");
    assert_eq!(value["num_views"], 0);
}

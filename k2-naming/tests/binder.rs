use k2_naming::mapping::{
    AttributeMapping, ColumnRole, CollectionKind, InheritanceStrategy, Schema, Table,
};
use k2_naming::prelude::*;
use k2_naming::{JpaCompliantNamingStrategy, MappingError, NamingError, ObjectNameNormalizer};

fn bind(mappings: &[EntityMapping]) -> Schema {
    let strategy = K2NamingStrategy::new();
    let context = BuildingContext::default();
    SchemaBinder::new(&strategy, &context).bind(mappings).unwrap()
}

fn bind_err(mappings: &[EntityMapping]) -> MappingError {
    let strategy = K2NamingStrategy::new();
    let context = BuildingContext::default();
    SchemaBinder::new(&strategy, &context)
        .bind(mappings)
        .unwrap_err()
}

fn table<'s>(schema: &'s Schema, name: &str) -> &'s Table {
    schema
        .table(name)
        .unwrap_or_else(|| panic!("no table {name} in {:?}", schema.table_names()))
}

fn texts(ids: &[Identifier]) -> Vec<&str> {
    ids.iter().map(Identifier::text).collect()
}

// ── inheritance ─────────────────────────────────────────────────────

#[test]
fn joined_hierarchy() {
    let schema = bind(&[
        EntityMapping::new("com.k2.hibernate.JoinedBaseClass")
            .id("id")
            .basic("value")
            .inheritance(InheritanceStrategy::Joined, Some("type")),
        EntityMapping::new("com.k2.hibernate.JoinedSubClass")
            .extends("com.k2.hibernate.JoinedBaseClass")
            .basic("subValue"),
    ]);

    assert_eq!(schema.table_names(), vec!["joined_base_class", "joined_sub_class"]);

    let base = table(&schema, "joined_base_class");
    assert_eq!(base.column_names(), vec!["id", "type", "value"]);
    assert_eq!(base.column("type").unwrap().role, ColumnRole::Discriminator);
    assert_eq!(texts(&base.primary_key), vec!["id"]);

    let sub = table(&schema, "joined_sub_class");
    assert_eq!(sub.column_names(), vec!["id", "sub_value"]);
    assert_eq!(sub.column("id").unwrap().role, ColumnRole::PrimaryKeyJoin);
    assert_eq!(sub.foreign_keys.len(), 1);
    let fk = &sub.foreign_keys[0];
    assert_eq!(fk.name.text(), "fk_joined_sub_class_id_joined_base_class");
    assert_eq!(fk.referenced_table.text(), "joined_base_class");
    assert_eq!(texts(&fk.referenced_columns), vec!["id"]);
}

#[test]
fn joined_hierarchy_without_explicit_discriminator() {
    let schema = bind(&[
        EntityMapping::new("Animal")
            .id("id")
            .inheritance(InheritanceStrategy::Joined, None),
        EntityMapping::new("Dog").extends("Animal").basic("barkVolume"),
    ]);
    assert_eq!(table(&schema, "animal").column_names(), vec!["id"]);
    assert_eq!(table(&schema, "dog").column_names(), vec!["id", "bark_volume"]);
}

#[test]
fn single_table_hierarchy() {
    let schema = bind(&[
        EntityMapping::new("com.acme.Vehicle")
            .id("vehicleId")
            .basic("brandName"),
        EntityMapping::new("com.acme.Car")
            .extends("Vehicle")
            .basic("doorCount"),
    ]);

    assert_eq!(schema.table_names(), vec!["vehicle"]);
    let vehicle = table(&schema, "vehicle");
    assert_eq!(
        vehicle.column_names(),
        vec!["vehicle_id", "dtype", "brand_name", "door_count"]
    );
    assert_eq!(texts(&vehicle.primary_key), vec!["vehicle_id"]);
}

#[test]
fn lone_entity_has_no_discriminator() {
    let schema = bind(&[EntityMapping::new("com.acme.Vehicle").id("id").basic("brandName")]);
    assert_eq!(table(&schema, "vehicle").column_names(), vec!["id", "brand_name"]);
}

#[test]
fn table_per_class_hierarchy() {
    let schema = bind(&[
        EntityMapping::new("com.k2.hibernate.TablePerClassBaseClass")
            .id("id")
            .basic("name")
            .inheritance(InheritanceStrategy::TablePerClass, None),
        EntityMapping::new("com.k2.hibernate.TablePerClassSubClass")
            .extends("com.k2.hibernate.TablePerClassBaseClass")
            .basic("extra"),
    ]);

    assert_eq!(
        schema.table_names(),
        vec!["table_per_class_base_class", "table_per_class_sub_class"]
    );
    let sub = table(&schema, "table_per_class_sub_class");
    assert_eq!(sub.column_names(), vec!["id", "name", "extra"]);
    assert_eq!(texts(&sub.primary_key), vec!["id"]);
    assert!(sub.foreign_keys.is_empty());
}

#[test]
fn subclasses_may_precede_their_parent() {
    let schema = bind(&[
        EntityMapping::new("Car").extends("Vehicle").basic("doorCount"),
        EntityMapping::new("Vehicle").id("id"),
    ]);
    assert_eq!(
        table(&schema, "vehicle").column_names(),
        vec!["id", "dtype", "door_count"]
    );
}

// ── associations ────────────────────────────────────────────────────

#[test]
fn many_to_one_join_column_and_foreign_key() {
    let schema = bind(&[
        EntityMapping::new("com.acme.Customer").id("id"),
        EntityMapping::new("com.acme.PurchaseOrder")
            .id("id")
            .attribute(AttributeMapping::many_to_one("customer", "Customer"))
            .basic("orderedAt"),
    ]);

    let order = table(&schema, "purchase_order");
    assert_eq!(order.column_names(), vec!["id", "customer_id", "ordered_at"]);
    assert_eq!(order.column("customer_id").unwrap().role, ColumnRole::JoinColumn);
    assert_eq!(order.foreign_keys.len(), 1);
    assert_eq!(order.foreign_keys[0].name.text(), "fk_purchase_order_id_customer");
    assert_eq!(order.foreign_keys[0].referenced_table.text(), "customer");
}

#[test]
fn many_to_many_join_table() {
    let schema = bind(&[
        EntityMapping::new("com.acme.Course")
            .id("id")
            .attribute(AttributeMapping::many_to_many("enrolledStudents", "com.acme.Student")),
        EntityMapping::new("com.acme.Student").id("id"),
    ]);

    assert_eq!(
        schema.table_names(),
        vec!["course", "course_enrolled_students", "student"]
    );
    let join = table(&schema, "course_enrolled_students");
    assert_eq!(join.column_names(), vec!["course_id", "enrolled_students_id"]);
    assert_eq!(texts(&join.primary_key), vec!["course_id", "enrolled_students_id"]);
    let fk_names: Vec<&str> = join.foreign_keys.iter().map(|fk| fk.name.text()).collect();
    assert_eq!(
        fk_names,
        vec![
            "fk_course_enrolled_students_id",
            "fk_course_enrolled_students_enrolled_students_id_student",
        ]
    );
}

#[test]
fn many_to_many_with_jpa_base() {
    let strategy = K2NamingStrategy::with_base(JpaCompliantNamingStrategy::new());
    let context = BuildingContext::default();
    let schema = SchemaBinder::new(&strategy, &context)
        .bind(&[
            EntityMapping::new("Course")
                .id("id")
                .attribute(AttributeMapping::many_to_many("enrolledStudents", "Student")),
            EntityMapping::new("Student").id("id"),
        ])
        .unwrap();
    assert!(schema.table("course_student").is_some());
}

#[test]
fn element_collections() {
    let schema = bind(&[EntityMapping::new("com.acme.Book")
        .id("id")
        .attribute(AttributeMapping::element_collection("tags", CollectionKind::Set))
        .attribute(AttributeMapping::element_collection(
            "chapterTitles",
            CollectionKind::List,
        ))
        .attribute(AttributeMapping::element_collection("metadata", CollectionKind::Map))]);

    assert_eq!(
        schema.table_names(),
        vec!["book", "book_tags", "book_chapter_titles", "book_metadata"]
    );

    let tags = table(&schema, "book_tags");
    assert_eq!(tags.column_names(), vec!["book_id", "tags"]);
    assert_eq!(texts(&tags.primary_key), vec!["book_id", "tags"]);

    let chapters = table(&schema, "book_chapter_titles");
    assert_eq!(
        chapters.column_names(),
        vec!["book_id", "chapter_titles_order", "chapter_titles"]
    );
    assert_eq!(
        chapters.column("chapter_titles_order").unwrap().role,
        ColumnRole::ListIndex
    );
    assert_eq!(texts(&chapters.primary_key), vec!["book_id", "chapter_titles_order"]);
    assert_eq!(chapters.foreign_keys[0].name.text(), "fk_book_chapter_titles_id");

    let metadata = table(&schema, "book_metadata");
    assert_eq!(metadata.column_names(), vec!["book_id", "metadata_key", "metadata"]);
    assert_eq!(metadata.column("metadata_key").unwrap().role, ColumnRole::MapKey);
}

#[test]
fn any_association_columns() {
    let schema = bind(&[EntityMapping::new("Payment")
        .id("id")
        .attribute(AttributeMapping::any("paymentMethod"))]);
    let payment = table(&schema, "payment");
    assert_eq!(
        payment.column_names(),
        vec!["id", "payment_method_dtype", "payment_method_id"]
    );
    assert_eq!(
        payment.column("payment_method_dtype").unwrap().role,
        ColumnRole::AnyDiscriminator
    );
}

// ── columns and constraints ─────────────────────────────────────────

#[test]
fn tenant_column_unique_keys_and_indexes() {
    let schema = bind(&[EntityMapping::new("com.acme.Account")
        .id("id")
        .tenant_aware()
        .basic("email")
        .basic("status")
        .basic("lastName")
        .basic("firstName")
        .unique(&["email", "status"])
        .index(&["lastName", "firstName"])]);

    let account = table(&schema, "account");
    assert_eq!(
        account.column_names(),
        vec!["id", "tenant_id", "email", "status", "last_name", "first_name"]
    );
    assert_eq!(account.column("tenant_id").unwrap().role, ColumnRole::TenantId);
    assert_eq!(account.unique_keys[0].name.text(), "uk_account_email_status");
    assert_eq!(account.indexes[0].name.text(), "idx_last_name_first_name");
    assert_eq!(texts(&account.indexes[0].columns), vec!["last_name", "first_name"]);
}

#[test]
fn constraint_on_subclass_of_single_table_lands_in_shared_table() {
    let schema = bind(&[
        EntityMapping::new("Vehicle").id("id"),
        EntityMapping::new("Car")
            .extends("Vehicle")
            .basic("plateNumber")
            .unique(&["plateNumber"]),
    ]);
    let vehicle = table(&schema, "vehicle");
    assert_eq!(vehicle.unique_keys.len(), 1);
    assert_eq!(vehicle.unique_keys[0].name.text(), "uk_vehicle_plate_number");
}

#[test]
fn explicit_names_are_kept() {
    let schema = bind(&[EntityMapping::new("com.acme.Invoice")
        .table("tbl_Invoices")
        .id("id")
        .attribute(AttributeMapping::basic("totalAmount").column("`TotalAmount`"))]);

    let invoice = table(&schema, "tbl_invoices");
    assert_eq!(invoice.name.text(), "tbl_Invoices");
    let total = &invoice.columns[1];
    assert_eq!(total.name.text(), "TotalAmount");
    assert!(total.name.is_quoted());
}

#[test]
fn explicit_keyword_column_is_auto_quoted() {
    let strategy = K2NamingStrategy::new();
    let context = BuildingContext {
        normalizer: ObjectNameNormalizer::new(false, true),
        ..BuildingContext::default()
    };
    let schema = SchemaBinder::new(&strategy, &context)
        .bind(&[EntityMapping::new("Line")
            .id("id")
            .attribute(AttributeMapping::basic("position").column("order"))])
        .unwrap();
    let column = &table(&schema, "line").columns[1];
    assert_eq!(column.name.render(), "`order`");
}

#[test]
fn implicit_keyword_names_are_auto_quoted() {
    let strategy = K2NamingStrategy::new();
    let context = BuildingContext {
        normalizer: ObjectNameNormalizer::new(false, true),
        ..BuildingContext::default()
    };
    let schema = SchemaBinder::new(&strategy, &context)
        .bind(&[EntityMapping::new("com.acme.Order").id("id").basic("user")])
        .unwrap();
    let order = table(&schema, "order");
    assert_eq!(order.name.render(), "`order`");
    assert_eq!(order.columns[0].name.render(), "id");
    assert_eq!(order.columns[1].name.render(), "`user`");
}

#[test]
fn global_quoting_reaches_every_name() {
    let strategy = K2NamingStrategy::new();
    let context = BuildingContext {
        normalizer: ObjectNameNormalizer::new(true, false),
        ..BuildingContext::default()
    };
    let schema = SchemaBinder::new(&strategy, &context)
        .bind(&[
            EntityMapping::new("Customer").id("id"),
            EntityMapping::new("Invoice")
                .id("id")
                .attribute(AttributeMapping::many_to_one("customer", "Customer")),
        ])
        .unwrap();
    for table in &schema.tables {
        assert!(table.identifiers().all(Identifier::is_quoted), "{:?}", table.name);
    }
}

// ── errors ──────────────────────────────────────────────────────────

#[test]
fn duplicate_entity() {
    let err = bind_err(&[EntityMapping::new("A").id("id"), EntityMapping::new("A").id("id")]);
    assert!(matches!(err, MappingError::DuplicateEntity(class) if class == "A"));
}

#[test]
fn unknown_target() {
    let err = bind_err(&[EntityMapping::new("Invoice")
        .id("id")
        .attribute(AttributeMapping::many_to_one("customer", "Customer"))]);
    assert!(matches!(err, MappingError::UnknownEntity(name) if name == "Customer"));
}

#[test]
fn unknown_parent() {
    let err = bind_err(&[EntityMapping::new("Car").extends("Vehicle").id("id")]);
    assert!(matches!(err, MappingError::UnknownEntity(_)));
}

#[test]
fn ambiguous_short_name_is_unknown() {
    let err = bind_err(&[
        EntityMapping::new("a.Customer").id("id"),
        EntityMapping::new("b.Customer").id("id").table("customer_b"),
        EntityMapping::new("Invoice")
            .id("id")
            .attribute(AttributeMapping::many_to_one("customer", "Customer")),
    ]);
    assert!(matches!(err, MappingError::UnknownEntity(_)));
}

#[test]
fn missing_identifier() {
    let err = bind_err(&[EntityMapping::new("Invoice").basic("total")]);
    assert!(matches!(err, MappingError::MissingIdentifier(class) if class == "Invoice"));
}

#[test]
fn association_without_target() {
    let mut attribute = AttributeMapping::many_to_one("customer", "Customer");
    attribute.target = None;
    let err = bind_err(&[EntityMapping::new("Invoice").id("id").attribute(attribute)]);
    assert!(matches!(err, MappingError::MissingTarget { .. }));
}

#[test]
fn unknown_constraint_attribute() {
    let err = bind_err(&[EntityMapping::new("Account").id("id").unique(&["email"])]);
    assert!(matches!(
        err,
        MappingError::UnknownAttribute { attribute, .. } if attribute == "email"
    ));
}

#[test]
fn inheritance_cycle() {
    let err = bind_err(&[
        EntityMapping::new("A").id("id").extends("B"),
        EntityMapping::new("B").id("id").extends("A"),
    ]);
    assert!(matches!(err, MappingError::InheritanceCycle(_)));
}

#[test]
fn naming_errors_are_wrapped() {
    let err = bind_err(&[EntityMapping::new("").id("id")]);
    assert!(matches!(err, MappingError::Naming(NamingError::MissingEntityName(_))));
    assert!(std::error::Error::source(&err).is_some());
}

// ── YAML ────────────────────────────────────────────────────────────

#[test]
fn mappings_from_yaml() {
    let yaml = r#"
- class: com.k2.hibernate.JoinedBaseClass
  id: { attribute: id }
  inheritance:
    strategy: joined
    discriminator_column: type
  attributes:
    - name: value
- class: com.k2.hibernate.JoinedSubClass
  extends: com.k2.hibernate.JoinedBaseClass
  attributes:
    - name: subValue
    - name: owner
      kind: many_to_one
      target: JoinedBaseClass
    - name: aliases
      kind: element_collection
      container: list
"#;
    let mappings = EntityMapping::list_from_yaml_str(yaml).unwrap();
    assert_eq!(mappings.len(), 2);
    assert_eq!(
        mappings[0].inheritance.as_ref().map(|i| i.strategy),
        Some(InheritanceStrategy::Joined)
    );

    let schema = bind(&mappings);
    assert_eq!(
        schema.table_names(),
        vec!["joined_base_class", "joined_sub_class", "joined_sub_class_aliases"]
    );
    let sub = table(&schema, "joined_sub_class");
    assert_eq!(sub.column_names(), vec!["id", "sub_value", "owner_id"]);
}

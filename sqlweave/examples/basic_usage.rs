use sqlweave::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== sqlweave - Basic Usage Examples ===\n");

    let u = table("dbo.Users")?.with_alias("u");
    let r = table("dbo.Roles")?.with_alias("r");

    // SELECT with a filter and a sort
    let select = select_from(u.clone())?
        .select([u.all_columns()])
        .where_([Condition::on(u.column("Email"), op::is_equal_to("a@b.com"))?])
        .order_by([OrderBy::asc(u.column("Name"))?]);

    let statement = select.build()?;
    println!("1. Basic SELECT:");
    println!("   SQL: {}", statement.text());
    println!("   Parameters: {:?}\n", statement.parameters());

    // JOIN plus an OR group next to a plain condition
    let joined = select_from(u.clone())?
        .select([u.column("Name"), r.column("Title")])
        .inner_join(u.column("RoleId"), r.column("Id"))?
        .where_([Condition::on(u.column("Active"), op::is_equal_to(true))?])
        .where_or([
            Condition::on(r.column("Title"), op::is_in(["admin", "owner"]))?,
            Condition::on(u.column("Age"), op::is_between(18, 65))?,
        ])?
        .order_by([OrderBy::desc(u.column("CreatedAt"))?])
        .limit(20);

    let statement = joined.build()?;
    println!("2. JOIN with grouped conditions:");
    println!("   SQL: {}", statement.text());
    for parameter in statement.named_parameters() {
        println!("   @{} = {:?}", parameter.name, parameter.value);
    }
    println!();

    // INSERT with a NULL cell
    let people = table("People")?;
    let insert = insert_into([people.column("Name"), people.column("Age")])?
        .value([Value::from("Ana"), Value::from(30)])?
        .value([Value::from("Bo"), Value::Null])?;

    let statement = insert.build()?;
    println!("3. Multi-row INSERT:");
    println!("   SQL: {}", statement.text());
    println!("   Parameters: {:?}\n", statement.parameters());

    // UPDATE
    let update = update(u.clone())?
        .set([
            ColumnUpdate::new(u.column("Name"), "Jane")?,
            ColumnUpdate::new(u.column("Age"), 25)?,
        ])
        .where_([Condition::on(u.column("Id"), op::is_equal_to(1))?]);

    println!("4. UPDATE:");
    println!("   SQL: {}\n", update.to_sql()?);

    // DELETE
    let delete = delete_from(u.clone())?
        .where_([Condition::on(u.column("LastLogin"), op::is_null())?]);

    println!("5. DELETE:");
    println!("   SQL: {}", delete.to_sql()?);

    Ok(())
}

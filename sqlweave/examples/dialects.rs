use sqlweave::prelude::*;
use sqlweave::Keyword;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== sqlweave - Dialect Examples ===\n");

    let users = table("Users")?;
    let query = select_from(users.clone())?
        .select([users.column("Id"), users.column("Name")])
        .where_([
            Condition::on(users.column("Status"), op::is_not_equal_to("banned"))?,
            Condition::on(users.column("Name"), op::is_like("A%"))?,
        ])
        .order_by([OrderBy::asc(users.column("Name"))?])
        .limit(10)
        .offset(20);

    let dialects = [
        Dialect::ansi(),
        Dialect::sql_server(),
        Dialect::postgres(),
        Dialect::mysql(),
        Dialect::sqlite(),
    ];

    for dialect in &dialects {
        let statement = query.build_with(dialect)?;
        println!("{}:", dialect.name);
        println!("   SQL: {}", statement.text());
        println!("   Parameters: {:?}\n", statement.parameters());
    }

    // Dialects are plain data: dump one, tweak it, load it back
    let custom = Dialect::sql_server().with_keyword(Keyword::TableAlias, "AS");
    let json = custom.to_json()?;
    let loaded = Dialect::from_json(&json)?;

    let aliased = users.clone().with_alias("u");
    let sql = select_from(aliased.clone())?
        .select([aliased.column("Id")])
        .with_dialect(loaded)
        .to_sql()?;

    println!("Custom dialect loaded from JSON:");
    println!("   SQL: {}", sql);

    Ok(())
}

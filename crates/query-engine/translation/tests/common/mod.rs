use query_engine_metadata::metadata::{Catalog, SemanticType, TypeInfo};
use query_engine_sql::sql;
use query_engine_translation::translation::mutation::IdGenerator;

pub const SCHEMA: &str = "public";

/// A small blog schema: users with posts.
pub fn catalog() -> Catalog {
    Catalog::new([
        TypeInfo::table(
            "User",
            [
                ("id", SemanticType::Id),
                ("email", SemanticType::String),
                ("createdAt", SemanticType::DateTime),
                ("meta", SemanticType::Json),
                ("posts", SemanticType::Relation),
            ],
        ),
        TypeInfo::table(
            "Post",
            [
                ("id", SemanticType::Id),
                ("title", SemanticType::String),
                ("published", SemanticType::Boolean),
                ("views", SemanticType::Number),
                ("status", SemanticType::Enum),
                ("authorId", SemanticType::Id),
                ("createdAt", SemanticType::DateTime),
                ("updatedAt", SemanticType::DateTime),
            ],
        ),
        TypeInfo::reference("PostWhereInput", [("title_contains", SemanticType::String)]),
    ])
}

#[derive(Debug)]
pub struct FixedId(pub &'static str);

impl IdGenerator for FixedId {
    fn generate(&self) -> String {
        self.0.to_string()
    }
}

/// Render a plan's SQL together with its numbered parameters.
pub fn render(plan: &sql::execution_plan::ExecutionPlan) -> (String, Vec<sql::string::Param>) {
    let sql = plan.raw_sql();
    (sql.sql, sql.params)
}

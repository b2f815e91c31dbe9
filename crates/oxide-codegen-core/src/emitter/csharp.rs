//! C# emitter.
//!
//! Each table becomes a class with one nullable auto-property per column,
//! followed by eleven `async` accessor methods. Every accessor runs its query
//! through the weaver's connection and command fragments, reads all rows into
//! a `List<T>`, and rethrows the driver exception unchanged.

use super::{CodeEmitter, EmitContext};
use crate::naming::snake_to_camel;
use crate::query::QueryOperation;
use crate::schema::{Column, TableMetadata};
use crate::weaver::TargetLanguage;

const INDENT: &str = "    ";

/// C# keywords that cannot be used as bare identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Locals declared by every generated method body.
const LOCALS: &[&str] = &[
    "query", "conn", "command", "reader", "results", "result", "entity", "ids", "searchTerm",
    "offset", "limit",
];

/// C# emitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpEmitter;

impl CSharpEmitter {
    /// Creates a new C# emitter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// One `command.Parameters.AddWithValue` line.
struct Binding {
    placeholder: String,
    value: String,
}

impl Binding {
    fn new(placeholder: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            value: value.into(),
        }
    }
}

/// Everything that differs between two accessors.
struct MethodShape {
    operation: QueryOperation,
    name: String,
    summary: String,
    parameters: Vec<String>,
    bindings: Vec<Binding>,
}

/// Per-table naming state shared by every method of the table.
struct TableScope<'t, 'c> {
    table: &'t TableMetadata,
    ctx: &'t EmitContext<'c>,
    class_name: String,
    /// Property name of each column, in `columns` order.
    members: Vec<String>,
}

impl<'t, 'c> TableScope<'t, 'c> {
    fn new(table: &'t TableMetadata, ctx: &'t EmitContext<'c>) -> Self {
        let class_name = ctx.weaver.class_name(table);
        let members = member_names(
            &class_name,
            table.columns().iter().map(|c| ctx.weaver.member_name(c.name())),
        );
        Self {
            table,
            ctx,
            class_name,
            members,
        }
    }

    /// Columns paired with their property names.
    fn members(&self) -> impl Iterator<Item = (&'t Column, &str)> + '_ {
        self.table
            .columns()
            .iter()
            .zip(self.members.iter().map(String::as_str))
    }

    fn csharp_type(&self, column: &Column) -> &'static str {
        self.ctx.types.map_type(column.data_type())
    }

    /// Method parameter declaration for a key column.
    fn key_parameter(&self, column: &Column, prefix: &str) -> (String, String) {
        let name = parameter_name(&format!("{prefix}{}", column.name()));
        let declaration = format!("{} {name}", self.csharp_type(column));
        (declaration, name)
    }

    /// Bindings that read every column from `entity`.
    fn entity_bindings(&self) -> Vec<Binding> {
        self.members()
            .map(|(c, member)| {
                Binding::new(
                    format!("@{}", c.name()),
                    format!("(object?)entity.{member} ?? DBNull.Value"),
                )
            })
            .collect()
    }

    /// Parameters and bindings for the key columns, in `columns` order.
    fn key_arguments(&self, prefix: &str) -> (Vec<String>, Vec<Binding>) {
        let mut parameters = Vec::new();
        let mut bindings = Vec::new();
        for column in self.table.primary_key_columns() {
            let (declaration, name) = self.key_parameter(column, prefix);
            parameters.push(declaration);
            bindings.push(Binding::new(format!("@{prefix}{}", column.name()), name));
        }
        (parameters, bindings)
    }

    /// Element type of the `ids` array: the shared key type, or `object`
    /// when key columns map to different types.
    fn id_element_type(&self) -> &'static str {
        let mut types = self
            .table
            .primary_key_columns()
            .into_iter()
            .map(|c| self.csharp_type(c));
        let Some(first) = types.next() else {
            return "object";
        };
        if types.all(|t| t == first) {
            first
        } else {
            "object"
        }
    }

    fn shape(&self, operation: QueryOperation) -> MethodShape {
        let class = &self.class_name;
        let table = self.table.name();
        let entity = || vec![format!("{class} entity")];
        let paging = || vec!["int offset".to_string(), "int limit".to_string()];
        let paging_bindings = || {
            vec![
                Binding::new("@offset", "offset"),
                Binding::new("@limit", "limit"),
            ]
        };

        let (name, summary, parameters, bindings) = match operation {
            QueryOperation::Insert => (
                format!("Insert{class}"),
                format!("Inserts a {table} row and returns it."),
                entity(),
                self.entity_bindings(),
            ),
            QueryOperation::Upsert => (
                format!("Upsert{class}"),
                format!("Inserts a {table} row, or updates it when the key already exists."),
                entity(),
                self.entity_bindings(),
            ),
            QueryOperation::Update => (
                format!("Update{class}"),
                format!("Updates the {table} row matching the entity's key."),
                entity(),
                self.entity_bindings(),
            ),
            QueryOperation::Delete => {
                let (parameters, bindings) = self.key_arguments("");
                (
                    format!("Delete{class}"),
                    format!("Deletes the {table} rows matching the key."),
                    parameters,
                    bindings,
                )
            }
            QueryOperation::SelectAll => (
                format!("Select{class}"),
                format!("Selects every {table} row."),
                Vec::new(),
                Vec::new(),
            ),
            QueryOperation::SelectById => {
                let (parameters, bindings) = self.key_arguments("");
                (
                    format!("Select{class}ById"),
                    format!("Selects the {table} row matching the key."),
                    parameters,
                    bindings,
                )
            }
            QueryOperation::SelectByIdRange => {
                let mut parameters = Vec::new();
                let mut bindings = Vec::new();
                for column in self.table.primary_key_columns() {
                    for prefix in ["start_", "end_"] {
                        let (declaration, name) = self.key_parameter(column, prefix);
                        parameters.push(declaration);
                        bindings.push(Binding::new(format!("@{prefix}{}", column.name()), name));
                    }
                }
                (
                    format!("Select{class}ByIdRange"),
                    format!("Selects {table} rows whose key falls within the given bounds."),
                    parameters,
                    bindings,
                )
            }
            QueryOperation::SelectByIdList => (
                format!("Select{class}ByIdList"),
                format!("Selects {table} rows whose key is in the given list."),
                vec![format!("{}[] ids", self.id_element_type())],
                vec![Binding::new("@ids", "ids")],
            ),
            QueryOperation::Search => (
                format!("Search{class}"),
                format!("Searches every {table} column for the given term."),
                vec!["string searchTerm".to_string()],
                self.table
                    .columns()
                    .iter()
                    .map(|c| Binding::new(format!("@{}", c.name()), "$\"%{searchTerm}%\""))
                    .collect(),
            ),
            QueryOperation::PagedOffsetLimit => (
                format!("Select{class}Paged"),
                format!("Selects a page of {table} rows."),
                paging(),
                paging_bindings(),
            ),
            QueryOperation::PagedWindowed => (
                format!("Select{class}PagedWindowed"),
                format!("Selects a page of {table} rows numbered by key."),
                paging(),
                paging_bindings(),
            ),
        };

        MethodShape {
            operation,
            name,
            summary,
            parameters,
            bindings,
        }
    }

    fn class_declaration(&self) -> String {
        let mut out = format!(
            "// Class for table {}\npublic class {}\n{{\n",
            self.table.name(),
            self.class_name
        );
        for (column, member) in self.members() {
            out.push_str(&format!(
                "{INDENT}public {}? {member} {{ get; set; }}\n",
                self.csharp_type(column)
            ));
        }
        out.push('}');
        out
    }

    fn method(&self, shape: &MethodShape) -> String {
        let class = &self.class_name;
        let weaver = self.ctx.weaver;
        let sql = self.ctx.queries.generate(shape.operation, self.table);
        let return_type = if shape.operation.is_single_result() {
            format!("{class}?")
        } else {
            format!("List<{class}>")
        };

        let mut out = String::new();
        line(&mut out, 0, "/// <summary>");
        line(&mut out, 0, &format!("/// {}", shape.summary));
        line(&mut out, 0, "/// </summary>");
        line(
            &mut out,
            0,
            &format!(
                "public async Task<{return_type}> {}({})",
                shape.name,
                shape.parameters.join(", ")
            ),
        );
        line(&mut out, 0, "{");
        line(
            &mut out,
            1,
            &format!("const string query = @\"{}\";", verbatim_escape(&sql)),
        );
        line(&mut out, 1, "try");
        line(&mut out, 1, "{");
        line(&mut out, 2, weaver.connection_fragment());
        line(&mut out, 2, weaver.command_fragment());
        for binding in &shape.bindings {
            line(
                &mut out,
                2,
                &format!(
                    "command.Parameters.AddWithValue({}, {});",
                    string_literal(&binding.placeholder),
                    binding.value
                ),
            );
        }
        line(&mut out, 2, "using var reader = await command.ExecuteReaderAsync();");
        self.reader_loop(&mut out, 2);
        if shape.operation.is_single_result() {
            line(&mut out, 2, "return results.FirstOrDefault();");
        } else {
            line(&mut out, 2, "return results;");
        }
        line(&mut out, 1, "}");
        line(
            &mut out,
            1,
            &format!("catch ({})", weaver.exception_type_name()),
        );
        line(&mut out, 1, "{");
        line(&mut out, 2, "throw;");
        line(&mut out, 1, "}");
        out.push('}');
        out
    }

    fn reader_loop(&self, out: &mut String, indent: usize) {
        let class = &self.class_name;
        line(out, indent, &format!("var results = new List<{class}>();"));
        line(out, indent, "while (await reader.ReadAsync())");
        line(out, indent, "{");
        line(out, indent + 1, &format!("var result = new {class}();"));
        for (column, member) in self.members() {
            let ty = self.csharp_type(column);
            let ordinal = format!("reader.GetOrdinal({})", string_literal(column.name()));
            let null = if self.ctx.types.is_value_type(ty) {
                format!("({ty}?)null")
            } else {
                "null".to_string()
            };
            line(
                out,
                indent + 1,
                &format!(
                    "result.{member} = reader.IsDBNull({ordinal}) ? {null} : reader.GetFieldValue<{ty}>({ordinal});"
                ),
            );
        }
        line(out, indent + 1, "results.Add(result);");
        line(out, indent, "}");
    }
}

impl CodeEmitter for CSharpEmitter {
    fn language(&self) -> TargetLanguage {
        TargetLanguage::CSharp
    }

    fn emit_table(&self, table: &TableMetadata, ctx: &EmitContext<'_>) -> String {
        let scope = TableScope::new(table, ctx);
        let mut sections = vec![scope.class_declaration()];
        sections.push(format!("// Methods for table {}", table.name()));
        let methods: Vec<String> = QueryOperation::ALL
            .into_iter()
            .map(|op| scope.method(&scope.shape(op)))
            .collect();
        let mut out = sections.join("\n\n");
        out.push('\n');
        out.push_str(&methods.join("\n\n"));
        out
    }
}

/// Appends `text` at `indent` levels, followed by a newline.
fn line(out: &mut String, indent: usize, text: &str) {
    for _ in 0..indent {
        out.push_str(INDENT);
    }
    out.push_str(text);
    out.push('\n');
}

/// Makes property names unique within a class.
///
/// C# forbids a member named like its enclosing type, so such a name gets a
/// `Value` suffix. A name already taken by an earlier column gets the first
/// free numeric suffix, starting at 2.
fn member_names(class_name: &str, names: impl Iterator<Item = String>) -> Vec<String> {
    let mut taken: Vec<String> = Vec::new();
    for name in names {
        let base = if name == class_name {
            format!("{name}Value")
        } else {
            name
        };
        let mut candidate = base.clone();
        let mut suffix = 2;
        while candidate == class_name || taken.contains(&candidate) {
            candidate = format!("{base}{suffix}");
            suffix += 1;
        }
        taken.push(candidate);
    }
    taken
}

/// lowerCamelCase parameter name that is neither a keyword nor a local.
fn parameter_name(column: &str) -> String {
    let name = snake_to_camel(column);
    if LOCALS.contains(&name.as_str()) {
        format!("{name}Value")
    } else if KEYWORDS.contains(&name.as_str()) {
        format!("@{name}")
    } else {
        name
    }
}

/// Escapes text for a C# verbatim string (`@"..."`).
fn verbatim_escape(text: &str) -> String {
    text.replace('"', "\"\"")
}

/// Quotes text as a regular C# string literal.
fn string_literal(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::PostgresQueryGenerator;
    use crate::schema::DatabaseEngine;
    use crate::typemap::{CSharpTypeMapper, TypeMapper};
    use crate::weaver::CSharpWeaver;

    fn emit(table: &TableMetadata) -> String {
        let queries = PostgresQueryGenerator::new();
        let weaver = CSharpWeaver::new(DatabaseEngine::Postgres).unwrap();
        let types = CSharpTypeMapper::new();
        let ctx = EmitContext {
            queries: &queries,
            weaver: &weaver,
            types: &types,
        };
        CSharpEmitter::new().emit_table(table, &ctx)
    }

    fn users() -> TableMetadata {
        TableMetadata::new(
            DatabaseEngine::Postgres,
            "users",
            vec![Column::new("id", "integer"), Column::new("email", "text")],
            vec!["id".to_string()],
        )
    }

    #[test]
    fn test_class_declaration() {
        let code = emit(&users());
        assert!(code.starts_with(
            "// Class for table users\n\
             public class Users\n\
             {\n\
             \x20   public int? Id { get; set; }\n\
             \x20   public string? Email { get; set; }\n\
             }\n\n\
             // Methods for table users\n"
        ));
    }

    #[test]
    fn test_insert_method_body() {
        let code = emit(&users());
        let expected = "\
/// <summary>
/// Inserts a users row and returns it.
/// </summary>
public async Task<Users?> InsertUsers(Users entity)
{
    const string query = @\"INSERT INTO users (id, email) VALUES (@id, @email) RETURNING id, email\";
    try
    {
        using var conn = await _dbConnectionFactory.CreateConnection();
        using var command = new NpgsqlCommand(query, conn);
        command.Parameters.AddWithValue(\"@id\", (object?)entity.Id ?? DBNull.Value);
        command.Parameters.AddWithValue(\"@email\", (object?)entity.Email ?? DBNull.Value);
        using var reader = await command.ExecuteReaderAsync();
        var results = new List<Users>();
        while (await reader.ReadAsync())
        {
            var result = new Users();
            result.Id = reader.IsDBNull(reader.GetOrdinal(\"id\")) ? (int?)null : reader.GetFieldValue<int>(reader.GetOrdinal(\"id\"));
            result.Email = reader.IsDBNull(reader.GetOrdinal(\"email\")) ? null : reader.GetFieldValue<string>(reader.GetOrdinal(\"email\"));
            results.Add(result);
        }
        return results.FirstOrDefault();
    }
    catch (NpgsqlException)
    {
        throw;
    }
}";
        assert!(code.contains(expected), "{code}");
    }

    #[test]
    fn test_method_signatures_in_order() {
        let code = emit(&users());
        let signatures: Vec<&str> = code
            .lines()
            .filter(|l| l.starts_with("public async Task<"))
            .collect();
        assert_eq!(
            signatures,
            [
                "public async Task<Users?> InsertUsers(Users entity)",
                "public async Task<Users?> UpsertUsers(Users entity)",
                "public async Task<Users?> UpdateUsers(Users entity)",
                "public async Task<List<Users>> DeleteUsers(int id)",
                "public async Task<List<Users>> SelectUsers()",
                "public async Task<Users?> SelectUsersById(int id)",
                "public async Task<List<Users>> SelectUsersByIdRange(int startId, int endId)",
                "public async Task<List<Users>> SelectUsersByIdList(int[] ids)",
                "public async Task<List<Users>> SearchUsers(string searchTerm)",
                "public async Task<List<Users>> SelectUsersPaged(int offset, int limit)",
                "public async Task<List<Users>> SelectUsersPagedWindowed(int offset, int limit)",
            ]
        );
    }

    #[test]
    fn test_single_and_list_returns() {
        let code = emit(&users());
        assert_eq!(code.matches("return results.FirstOrDefault();").count(), 4);
        assert_eq!(code.matches("return results;").count(), 7);
        assert_eq!(code.matches("catch (NpgsqlException)").count(), 11);
        assert_eq!(code.matches("throw;").count(), 11);
    }

    #[test]
    fn test_search_and_range_bindings() {
        let code = emit(&users());
        assert!(code.contains("command.Parameters.AddWithValue(\"@email\", $\"%{searchTerm}%\");"));
        assert!(code.contains("command.Parameters.AddWithValue(\"@start_id\", startId);"));
        assert!(code.contains("command.Parameters.AddWithValue(\"@end_id\", endId);"));
        assert!(code.contains("command.Parameters.AddWithValue(\"@ids\", ids);"));
        assert!(code.contains("command.Parameters.AddWithValue(\"@offset\", offset);"));
    }

    #[test]
    fn test_composite_key_with_mixed_types() {
        let table = TableMetadata::new(
            DatabaseEngine::Postgres,
            "order_items",
            vec![
                Column::new("order_id", "bigint"),
                Column::new("item_id", "integer"),
                Column::new("quantity", "integer"),
            ],
            vec!["item_id".to_string(), "order_id".to_string()],
        );
        let code = emit(&table);
        assert!(code.contains("public async Task<List<OrderItems>> DeleteOrderItems(long orderId, int itemId)"));
        assert!(code.contains(
            "SelectOrderItemsByIdRange(long startOrderId, long endOrderId, int startItemId, int endItemId)"
        ));
        assert!(code.contains("SelectOrderItemsByIdList(object[] ids)"));
    }

    #[test]
    fn test_member_named_like_class() {
        let table = TableMetadata::new(
            DatabaseEngine::Postgres,
            "email",
            vec![Column::new("id", "integer"), Column::new("email", "text")],
            vec!["id".to_string()],
        );
        let code = emit(&table);
        assert!(code.contains("public string? EmailValue { get; set; }"));
        assert!(code.contains("(object?)entity.EmailValue ?? DBNull.Value"));
        assert!(code.contains("result.EmailValue = "));
    }

    #[test]
    fn test_suffixed_member_does_not_collide() {
        let table = TableMetadata::new(
            DatabaseEngine::Postgres,
            "email",
            vec![
                Column::new("id", "integer"),
                Column::new("email", "text"),
                Column::new("email_value", "integer"),
            ],
            vec!["id".to_string()],
        );
        let code = emit(&table);
        assert!(code.contains("public string? EmailValue { get; set; }"));
        assert!(code.contains("public int? EmailValue2 { get; set; }"));
        assert!(code.contains("command.Parameters.AddWithValue(\"@email_value\", (object?)entity.EmailValue2 ?? DBNull.Value);"));
        assert!(code.contains("result.EmailValue2 = reader.IsDBNull(reader.GetOrdinal(\"email_value\"))"));
    }

    #[test]
    fn test_columns_with_same_pascal_name() {
        let table = TableMetadata::new(
            DatabaseEngine::Postgres,
            "accounts",
            vec![
                Column::new("user_id", "integer"),
                Column::new("UserId", "text"),
            ],
            vec!["user_id".to_string()],
        );
        let code = emit(&table);
        assert!(code.contains("public int? UserId { get; set; }"));
        assert!(code.contains("public string? UserId2 { get; set; }"));
        assert_eq!(code.matches("public int? UserId ").count(), 1);
    }

    #[test]
    fn test_member_names() {
        let names = |raw: &[&str]| member_names("Order", raw.iter().map(|n| (*n).to_string()));
        assert_eq!(names(&["Id", "Total"]), ["Id", "Total"]);
        assert_eq!(names(&["Order", "OrderValue"]), ["OrderValue", "OrderValue2"]);
        assert_eq!(names(&["A", "A", "A"]), ["A", "A2", "A3"]);
        assert_eq!(names(&["A2", "A", "A"]), ["A2", "A", "A3"]);
    }

    #[test]
    fn test_null_reads_follow_context_mapper() {
        /// Treats every target type as a reference type.
        struct ReferenceOnly;

        impl TypeMapper for ReferenceOnly {
            fn map_type(&self, dialect_type: &str) -> &'static str {
                CSharpTypeMapper::new().map_type(dialect_type)
            }

            fn fallback_type(&self) -> &'static str {
                "string"
            }

            fn is_value_type(&self, _target_type: &str) -> bool {
                false
            }
        }

        let queries = PostgresQueryGenerator::new();
        let weaver = CSharpWeaver::new(DatabaseEngine::Postgres).unwrap();
        let ctx = EmitContext {
            queries: &queries,
            weaver: &weaver,
            types: &ReferenceOnly,
        };
        let code = CSharpEmitter::new().emit_table(&users(), &ctx);
        assert!(code.contains(
            "result.Id = reader.IsDBNull(reader.GetOrdinal(\"id\")) ? null : reader.GetFieldValue<int>("
        ));
        assert!(!code.contains("(int?)null"));
    }

    #[test]
    fn test_parameter_name() {
        assert_eq!(parameter_name("order_id"), "orderId");
        assert_eq!(parameter_name("class"), "@class");
        assert_eq!(parameter_name("limit"), "limitValue");
        assert_eq!(parameter_name("start_id"), "startId");
    }

    #[test]
    fn test_literal_escaping() {
        assert_eq!(verbatim_escape("a \"b\""), "a \"\"b\"\"");
        assert_eq!(string_literal("we\"ird\\"), "\"we\\\"ird\\\\\"");
    }
}

//! Extension suffix → syntax label used on fenced code blocks.

use std::path::Path;

pub const DEFAULT_LABEL: &str = "plaintext";

/// Ordered so that `all` expands the same way on every run.
pub static EXTENSION_LABELS: &[(&str, &str)] = &[
    // Configuration & infrastructure
    (".tf", "hcl"),
    (".tfvars", "hcl"),
    (".yaml", "yaml"),
    (".yml", "yaml"),
    (".json", "json"),
    (".xml", "xml"),
    (".toml", "toml"),
    (".ini", "ini"),
    (".conf", "nginx"),
    (".config", "xml"),
    (".env", "plaintext"),
    // Web
    (".js", "javascript"),
    (".jsx", "jsx"),
    (".ts", "typescript"),
    (".tsx", "tsx"),
    (".html", "html"),
    (".css", "css"),
    (".scss", "scss"),
    (".less", "less"),
    (".vue", "vue"),
    (".svelte", "svelte"),
    // Backend
    (".py", "python"),
    (".java", "java"),
    (".go", "go"),
    (".rb", "ruby"),
    (".php", "php"),
    (".cs", "csharp"),
    (".cpp", "cpp"),
    (".c", "c"),
    (".rs", "rust"),
    (".scala", "scala"),
    (".kt", "kotlin"),
    (".swift", "swift"),
    // Database
    (".sql", "sql"),
    (".prisma", "prisma"),
    (".graphql", "graphql"),
    (".gql", "graphql"),
    // Shell
    (".sh", "bash"),
    (".bash", "bash"),
    (".zsh", "bash"),
    (".fish", "fish"),
    (".ps1", "powershell"),
    (".bat", "batch"),
    (".cmd", "batch"),
    // Docs
    (".md", "markdown"),
    (".mdx", "mdx"),
    (".txt", "plaintext"),
    (".rst", "rst"),
    // Containers
    (".dockerfile", "dockerfile"),
    (".containerfile", "dockerfile"),
    // Build & package
    (".lock", "yaml"),
    (".gradle", "groovy"),
    (".maven", "xml"),
    (".pom", "xml"),
    // Other
    (".vim", "vim"),
    (".lua", "lua"),
];

/// Every suffix in the table, in table order.
pub fn all_suffixes() -> Vec<String> {
    EXTENSION_LABELS
        .iter()
        .map(|(ext, _)| (*ext).to_string())
        .collect()
}

/// Label for a file, keyed on its final extension (lowercased).
pub fn label_for(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return DEFAULT_LABEL;
    };
    let key = format!(".{}", ext.to_lowercase());

    EXTENSION_LABELS
        .iter()
        .find(|(suffix, _)| *suffix == key)
        .map(|(_, label)| *label)
        .unwrap_or(DEFAULT_LABEL)
}

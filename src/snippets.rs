//! Built-in example programs
//!
//! The catalog is an ordered list; its first entry is the default selection.
//! Keys are unique within a catalog.

use rustc_hash::FxHashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub key: String,
    pub label: String,
    pub code: String,
}

impl Snippet {
    pub fn new(key: &str, label: &str, code: &str) -> Self {
        Snippet {
            key: key.to_string(),
            label: label.to_string(),
            code: code.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("snippet catalog is empty")]
    Empty,

    #[error("duplicate snippet key '{0}'")]
    DuplicateKey(String),
}

#[derive(Debug, Clone)]
pub struct SnippetCatalog {
    snippets: Vec<Snippet>,
    index: FxHashMap<String, usize>,
}

impl SnippetCatalog {
    pub fn new(snippets: Vec<Snippet>) -> Result<Self, CatalogError> {
        if snippets.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = FxHashMap::default();
        for (position, snippet) in snippets.iter().enumerate() {
            if index.insert(snippet.key.clone(), position).is_some() {
                return Err(CatalogError::DuplicateKey(snippet.key.clone()));
            }
        }

        Ok(SnippetCatalog { snippets, index })
    }

    /// The catalog shipped with the playground
    pub fn builtin() -> Self {
        let snippets = BUILTIN
            .iter()
            .map(|(key, label, code)| Snippet::new(key, label, code))
            .collect();
        // keys below are distinct and the list is non-empty
        Self::new(snippets).unwrap_or_else(|e| unreachable!("builtin catalog: {}", e))
    }

    /// Default selection
    pub fn first(&self) -> &Snippet {
        &self.snippets[0]
    }

    pub fn get(&self, key: &str) -> Option<&Snippet> {
        self.index.get(key).map(|&i| &self.snippets[i])
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snippet> {
        self.snippets.iter()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}

const BUILTIN: &[(&str, &str, &str)] = &[
    ("helloWorld", "Hello World", "print(\"Hello, World!\");\n"),
    (
        "arithmeticOperation",
        "Arithmetic Operation",
        "print(\n  ((2 + 3) * 5 - 7 / 11) % 13\n);\n",
    ),
    (
        "variableDeclaration",
        "Variable Declaration",
        "var x = 1;\nvar y = 2;\n\nprint(x + y);\n",
    ),
    (
        "ifStatement",
        "If Statement",
        r#"var age = 99; // Enter your age!
var price;

if (age <= 3) {
    price = 100;
} else if (3 < age && age <= 9) {
    price = 300;
} else {
    price = 500;
}

print(price);
"#,
    ),
    (
        "forStatement",
        "For Statement",
        r#"for(var i = 0; i < 10; i = i + 1) {
    if (i == 3) {
        continue; // Move on to the next iteration
    }

    print(i);

    if (i == 7) {
        break;    // Break out of the loop
    }
}
"#,
    ),
    (
        "array",
        "Array",
        r#"var arr = [1, 2, 3];

// Access elements
print(arr[0]); // First element
print(arr[len(arr) - 1]); // Last element

// Manipulate elements
push(arr, 4); // Add element to the last
print(arr);

pop(arr); // Remove the last element
pop(arr);
pop(arr);
pop(arr);
print(arr);
"#,
    ),
    (
        "functionDeclarationAndCall",
        "Function Declaration and Call",
        r#"// Declaration
func add(a, b) {
    return a + b;
}

// Use () operator to call function
var result = add(add(1, 2), 3);
print(result);
"#,
    ),
    (
        "blockScope",
        "Block Scope",
        r#"var x = 100;

{
    var x = 200; // If you remove this line, how would the result change and why?
    x = 300;
}

print(x);
"#,
    ),
    (
        "recursiveFunction",
        "Recursive Function",
        r#"func factorial(n) {
    print(n);
    if (n == 0) {
        return 1;
    }
    return n * factorial(n - 1);
}
print(factorial(5));
"#,
    ),
    (
        "lexicalScoping",
        "Lexical Scoping",
        r#"func init() {
    var name = "Momonga";  // `name` is a local variable of init()
    func printName() {
        print(name);  // Use variable declared in the parent function
    }
    printName();
}
init();
"#,
    ),
];

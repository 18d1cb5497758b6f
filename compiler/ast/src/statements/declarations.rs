// Copyright (C) 2019-2025 Aleo Systems Inc.
// This file is part of the Radian library.

// The Radian library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Radian library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Radian library. If not, see <https://www.gnu.org/licenses/>.

use super::*;

/// A `var name [= value]` declaration of a mutable name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarDeclaration {
    /// The name being declared.
    pub name: Identifier,
    /// The initial value, if any.
    pub expression: Option<Expression>,
    /// The indent level of the statement's line.
    pub indent: u32,
    /// The span of the statement.
    pub span: Span,
}

simple_node_impl!(VarDeclaration);

impl fmt::Display for VarDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.expression {
            Some(expression) => write!(f, "var {} = {}", self.name, expression),
            None => write!(f, "var {}", self.name),
        }
    }
}

/// A `def name = value` declaration.
///
/// Same grammar as `var`, but the binding cannot be updated afterward.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionStatement {
    /// The name being declared.
    pub name: Identifier,
    /// The defined value. Always present in legal programs; a missing value
    /// has already produced a syntax error.
    pub expression: Option<Expression>,
    /// The indent level of the statement's line.
    pub indent: u32,
    /// The span of the statement.
    pub span: Span,
}

simple_node_impl!(DefinitionStatement);

impl fmt::Display for DefinitionStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.expression {
            Some(expression) => write!(f, "def {} = {}", self.name, expression),
            None => write!(f, "def {}", self.name),
        }
    }
}

/// A `function name(params)` declaration.
///
/// With a `= expression` tail it is a single-line function; with a colon it
/// opens a block whose statements form the body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    /// The function name.
    pub name: Identifier,
    /// The parameter clause, an identifier or comma chain of identifiers.
    pub parameter: Option<Expression>,
    /// The body expression of a single-line function.
    pub expression: Option<Expression>,
    /// The indent level of the statement's line.
    pub indent: u32,
    /// The span of the statement.
    pub span: Span,
}

simple_node_impl!(FunctionDeclaration);

impl FunctionDeclaration {
    /// A function with no body expression opens a block.
    pub fn is_block_begin(&self) -> bool {
        self.expression.is_none()
    }
}

impl fmt::Display for FunctionDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "function {}", self.name)?;
        if let Some(parameter) = &self.parameter {
            write!(f, "({parameter})")?;
        }
        match &self.expression {
            Some(expression) => write!(f, " = {expression}"),
            None => write!(f, ":"),
        }
    }
}

/// A `method name(params):` declaration, opening a block. Methods exist
/// inside objects; their implicit self is mutable and is also the result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    /// The method name.
    pub name: Identifier,
    /// The parameter clause.
    pub parameter: Option<Expression>,
    /// The indent level of the statement's line.
    pub indent: u32,
    /// The span of the statement.
    pub span: Span,
}

simple_node_impl!(MethodDeclaration);

impl fmt::Display for MethodDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "method {}", self.name)?;
        if let Some(parameter) = &self.parameter {
            write!(f, "({parameter})")?;
        }
        write!(f, ":")
    }
}

/// An `object name(params) [from prototype]:` declaration, opening a block
/// whose declarations become members of the constructed object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDeclaration {
    /// The object name.
    pub name: Identifier,
    /// The parameter clause; parameters become member vars.
    pub parameter: Option<Expression>,
    /// The prototype expression whose members seed the new object.
    pub prototype: Option<Expression>,
    /// The indent level of the statement's line.
    pub indent: u32,
    /// The span of the statement.
    pub span: Span,
}

simple_node_impl!(ObjectDeclaration);

impl fmt::Display for ObjectDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "object {}", self.name)?;
        if let Some(parameter) = &self.parameter {
            write!(f, "({parameter})")?;
        }
        if let Some(prototype) = &self.prototype {
            write!(f, " from {prototype}")?;
        }
        write!(f, ":")
    }
}

/// An `import name [from source]` declaration, binding the base name of
/// another compilation unit in the current scope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDeclaration {
    /// The module name, doubling as the file base name.
    pub name: Identifier,
    /// The directory the module is found in.
    pub source_dir: Option<Expression>,
    /// The indent level of the statement's line.
    pub indent: u32,
    /// The span of the statement.
    pub span: Span,
}

simple_node_impl!(ImportDeclaration);

impl fmt::Display for ImportDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source_dir {
            Some(source_dir) => write!(f, "import {} from {}", self.name, source_dir),
            None => write!(f, "import {}", self.name),
        }
    }
}

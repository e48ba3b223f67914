//! Statement visitor.
//!
//! Passes locate their dispatch sites and constant groups by walking every
//! function body in preorder. Default `visit_*` methods call the matching
//! `walk_*` function, so an implementation only overrides the nodes it
//! cares about and keeps descending by calling `walk_*` itself.
//!
//! # Example
//!
//! ```text
//! struct CountSwitches {
//!     count: usize,
//! }
//!
//! impl<'ast> Visitor<'ast> for CountSwitches {
//!     fn visit_switch(&mut self, switch: &'ast SwitchStmt) {
//!         self.count += 1;
//!         walk_switch(self, switch);
//!     }
//! }
//! ```

use crate::ast::{CaseClause, ConstGroup, FuncDecl, Stmt, SwitchStmt, TypeSwitchStmt};
use crate::Unit;

pub trait Visitor<'ast> {
    fn visit_unit(&mut self, unit: &'ast Unit) {
        walk_unit(self, unit);
    }

    fn visit_func(&mut self, func: &'ast FuncDecl) {
        walk_func(self, func);
    }

    fn visit_const_group(&mut self, group: &'ast ConstGroup) {
        let _ = group;
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_switch(&mut self, switch: &'ast SwitchStmt) {
        walk_switch(self, switch);
    }

    fn visit_type_switch(&mut self, switch: &'ast TypeSwitchStmt) {
        walk_type_switch(self, switch);
    }

    fn visit_clause(&mut self, clause: &'ast CaseClause) {
        walk_clause(self, clause);
    }
}

/// Top-level constant groups first, then every function body.
pub fn walk_unit<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, unit: &'ast Unit) {
    for group in &unit.consts {
        visitor.visit_const_group(group);
    }
    for func in &unit.funcs {
        visitor.visit_func(func);
    }
}

pub fn walk_func<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, func: &'ast FuncDecl) {
    walk_stmts(visitor, &func.body);
}

fn walk_stmts<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, stmts: &'ast [Stmt]) {
    for stmt in stmts {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, stmt: &'ast Stmt) {
    match stmt {
        Stmt::Const(group) => visitor.visit_const_group(group),
        Stmt::Block(stmts, _) | Stmt::For { body: stmts, .. } => walk_stmts(visitor, stmts),
        Stmt::If {
            then_branch,
            else_branch,
            ..
        } => {
            walk_stmts(visitor, then_branch);
            walk_stmts(visitor, else_branch);
        }
        Stmt::Switch(switch) => visitor.visit_switch(switch),
        Stmt::TypeSwitch(switch) => visitor.visit_type_switch(switch),
        Stmt::Expr(..) | Stmt::Assign { .. } | Stmt::Return(..) => {}
    }
}

pub fn walk_switch<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, switch: &'ast SwitchStmt) {
    for clause in &switch.clauses {
        visitor.visit_clause(clause);
    }
}

pub fn walk_type_switch<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    switch: &'ast TypeSwitchStmt,
) {
    for clause in &switch.clauses {
        visitor.visit_clause(clause);
    }
}

pub fn walk_clause<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, clause: &'ast CaseClause) {
    walk_stmts(visitor, &clause.body);
}

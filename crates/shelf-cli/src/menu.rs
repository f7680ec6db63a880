//! Interactive menus.
//!
//! Engine errors are printed and the menu continues; only prompt failures
//! (closed stdin, no terminal) end the session.

use shelf_core::{NewBook, NewMember, Principal, Role, ShelfError};

use crate::app::AppContext;
use crate::helpers::{choose, parse_copies, prompt_password, prompt_text, today};
use crate::output::{books_table, format_due, member_loans_table, overdue_table};

fn report(err: &ShelfError) {
    eprintln!("Error: {}", err);
}

/// Top-level loop: log in as librarian or member, or exit.
pub fn run(ctx: &AppContext) -> anyhow::Result<()> {
    loop {
        println!();
        let choice = choose(
            "Library Management System",
            &["Librarian Login", "Member Login", "Exit"],
        )?;
        let role = match choice {
            0 => Role::Librarian,
            1 => Role::Member,
            _ => return Ok(()),
        };

        let id = prompt_text(match role {
            Role::Librarian => "Librarian ID",
            Role::Member => "Member ID",
        })?;
        let password = prompt_password("Password")?;

        match ctx
            .auth()
            .authenticate(ctx.circulation().store(), role, &id, &password)
        {
            Ok(principal) => {
                println!("Welcome, {}!", principal.id);
                match principal.role {
                    Role::Librarian => librarian_menu(ctx, &principal)?,
                    Role::Member => member_menu(ctx, &principal)?,
                }
            }
            Err(ShelfError::AuthFailed) => eprintln!("Login failed."),
            Err(err) => report(&err),
        }
    }
}

fn librarian_menu(ctx: &AppContext, principal: &Principal) -> anyhow::Result<()> {
    loop {
        println!();
        let choice = choose(
            "Librarian Dashboard",
            &[
                "Add Book",
                "Register Member",
                "Issue Book",
                "Return Book",
                "Overdue List",
                "Logout",
            ],
        )?;
        match choice {
            0 => add_book(ctx, principal)?,
            1 => register_member(ctx, principal)?,
            2 => issue_book(ctx, principal)?,
            3 => return_book(ctx, principal)?,
            4 => overdue_list(ctx, principal),
            _ => return Ok(()),
        }
    }
}

fn member_menu(ctx: &AppContext, principal: &Principal) -> anyhow::Result<()> {
    loop {
        println!();
        let choice = choose(
            "Member Dashboard",
            &["Search Catalogue", "Borrow Book", "My Loans", "Logout"],
        )?;
        match choice {
            0 => search_catalogue(ctx, principal)?,
            1 => borrow_book(ctx, principal)?,
            2 => my_loans(ctx, principal),
            _ => return Ok(()),
        }
    }
}

fn add_book(ctx: &AppContext, principal: &Principal) -> anyhow::Result<()> {
    let isbn = prompt_text("ISBN")?;
    let title = prompt_text("Title")?;
    let author = prompt_text("Author")?;
    let Some(copies) = parse_copies(&prompt_text("Total Copies")?) else {
        eprintln!("Invalid number of copies.");
        return Ok(());
    };

    let new_book = NewBook {
        isbn,
        title,
        author,
        copies,
    };
    match ctx.circulation().add_book(principal, new_book) {
        Ok(book) => println!("Book added: {} ({} copies).", book.title, book.copies_total),
        Err(err) => report(&err),
    }
    Ok(())
}

fn register_member(ctx: &AppContext, principal: &Principal) -> anyhow::Result<()> {
    let name = prompt_text("Name")?;
    let member_id = prompt_text("Member ID")?;
    let email = prompt_text("Email")?;
    let password = prompt_password("Password")?;
    let confirmation = prompt_password("Confirm Password")?;

    let new_member = NewMember {
        member_id,
        name,
        email,
        password,
        confirmation,
    };
    match ctx
        .circulation()
        .register_member(principal, new_member, ctx.auth().hasher(), today())
    {
        Ok(member) => println!("Member {} registered.", member.member_id),
        Err(err) => report(&err),
    }
    Ok(())
}

fn issue_book(ctx: &AppContext, principal: &Principal) -> anyhow::Result<()> {
    let isbn = prompt_text("ISBN to issue")?;
    let member_id = prompt_text("Member ID")?;
    match ctx
        .circulation()
        .issue_book(principal, &isbn, &member_id, today())
    {
        Ok(loan) => println!(
            "Book issued (loan {}). Due on {}.",
            loan.loan_id,
            format_due(loan.due_date)
        ),
        Err(err) => report(&err),
    }
    Ok(())
}

fn return_book(ctx: &AppContext, principal: &Principal) -> anyhow::Result<()> {
    let isbn = prompt_text("ISBN to return")?;
    let member_id = prompt_text("Member ID")?;
    match ctx
        .circulation()
        .return_book(principal, &isbn, &member_id, today())
    {
        Ok(loan) => println!("Book returned (loan {}).", loan.loan_id),
        Err(err) => report(&err),
    }
    Ok(())
}

fn overdue_list(ctx: &AppContext, principal: &Principal) {
    match ctx.circulation().overdue_report(principal, today()) {
        Ok(loans) if loans.is_empty() => println!("No overdue loans."),
        Ok(loans) => println!("{}", overdue_table(&loans)),
        Err(err) => report(&err),
    }
}

fn search_catalogue(ctx: &AppContext, principal: &Principal) -> anyhow::Result<()> {
    let keyword = prompt_text("Search by title/author")?;
    match ctx.circulation().search_catalogue(principal, &keyword) {
        Ok(books) if books.is_empty() => println!("No books found."),
        Ok(books) => println!("{}", books_table(&books)),
        Err(err) => report(&err),
    }
    Ok(())
}

fn borrow_book(ctx: &AppContext, principal: &Principal) -> anyhow::Result<()> {
    let isbn = prompt_text("ISBN to borrow")?;
    match ctx.circulation().borrow_book(principal, &isbn, today()) {
        Ok(loan) => println!("Book borrowed. Due on {}.", format_due(loan.due_date)),
        Err(err) => report(&err),
    }
    Ok(())
}

fn my_loans(ctx: &AppContext, principal: &Principal) {
    match ctx.circulation().member_loans(principal, &principal.id) {
        Ok(loans) if loans.is_empty() => println!("No loans."),
        Ok(loans) => println!("{}", member_loans_table(&loans)),
        Err(err) => report(&err),
    }
}

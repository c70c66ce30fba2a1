use crate::site::graph::ListingCard;
use maud::{html, Markup};

pub fn listing_card(card: &ListingCard) -> Markup {
    html! {
        div class="card" {
            @if card.is_featured {
                span class="badge" { "精選" }
                " "
            }
            a href=(card.href) { b { (card.title) } }
            @if !card.meta_line.is_empty() {
                div class="sub" { (card.meta_line) }
            }
            @if !card.state_tags.is_empty() {
                div class="sub" {
                    @for tag in &card.state_tags {
                        span class="badge" { (tag) } " "
                    }
                }
            }
        }
    }
}

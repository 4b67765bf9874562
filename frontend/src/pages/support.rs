use yew::prelude::*;

/// Static help page.
#[function_component(SupportPage)]
pub fn support_page() -> Html {
    html! {
        <div class="support-page">
            <h2>{"Support"}</h2>
            <div class="faq">
                <div class="faq-item">
                    <h3>{"How do I add an income or expense?"}</h3>
                    <p>{"Open the Income or Expenses page, fill in the amount, pick a \
                        category and subcategory, and submit. The table and charts \
                        update immediately."}</p>
                </div>
                <div class="faq-item">
                    <h3>{"Why can't I pick a subcategory?"}</h3>
                    <p>{"Subcategories depend on the selected category. Choose a \
                        category first and the subcategory list unlocks."}</p>
                </div>
                <div class="faq-item">
                    <h3>{"How do I change a record?"}</h3>
                    <p>{"Use the pencil button on its table row to load it into the \
                        form, adjust the fields and submit. The trash button deletes \
                        the record immediately."}</p>
                </div>
                <div class="faq-item">
                    <h3>{"What does Gain / Loss mean on the dashboard?"}</h3>
                    <p>{"It is your total income minus total expenses. The card shows \
                        Gain when the balance is zero or positive, Loss otherwise."}</p>
                </div>
                <div class="faq-item">
                    <h3>{"I forgot my password"}</h3>
                    <p>{"Enter your email on the sign-in page and use the 'Forgot \
                        password?' link to receive a reset email."}</p>
                </div>
            </div>
            <p class="support-contact">
                {"Still stuck? Write to "}
                <a href="mailto:support@pennyflow.app">{"support@pennyflow.app"}</a>
            </p>
        </div>
    }
}

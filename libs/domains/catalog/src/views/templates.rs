//! Page templates. Every page is rendered into `content` and wrapped by [`LAYOUT`].

pub(super) const LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{title}}</title>
  <style>
    body { font-family: system-ui, sans-serif; margin: 0; display: flex; color: #222; }
    nav { min-width: 200px; padding: 1.5rem; background: #f3f5f2; min-height: 100vh; }
    nav ul { list-style: none; padding: 0; }
    nav li { margin: 0.4rem 0; }
    main { padding: 1.5rem 2rem; max-width: 760px; }
    .errors { color: #a4161a; }
    .muted { color: #666; }
    label { display: block; margin-top: 0.8rem; font-weight: 600; }
    input[type=text], textarea { width: 100%; padding: 0.3rem; }
    .checkbox label { display: inline; font-weight: normal; margin-right: 0.8rem; }
    button { margin-top: 1rem; }
  </style>
</head>
<body>
  <nav>
    <ul>
      <li><a href="/catalog">Home</a></li>
      <li><a href="/catalog/items">All items</a></li>
      <li><a href="/catalog/categories">All categories</a></li>
    </ul>
    <ul>
      <li><a href="/catalog/category/create">Create new category</a></li>
      <li><a href="/catalog/item/create">Create new item</a></li>
    </ul>
  </nav>
  <main>
{{{content}}}
  </main>
</body>
</html>
"#;

pub(super) const INDEX: &str = r#"<h1>{{title}}</h1>
<p>Welcome to the grocery inventory.</p>
<h2>Inventory contents</h2>
<p>The inventory has the following record counts:</p>
<ul>
  <li><strong>Items:</strong> {{item_count}}</li>
  <li><strong>Categories:</strong> {{category_count}}</li>
</ul>
"#;

pub(super) const CATEGORY_LIST: &str = r#"<h1>{{title}}</h1>
{{#if categories}}
<ul>
  {{#each categories}}
  <li><a href="{{url}}">{{name}}</a></li>
  {{/each}}
</ul>
{{else}}
<p>There are no categories.</p>
{{/if}}
"#;

pub(super) const CATEGORY_DETAIL: &str = r#"<h1>Category: {{category.name}}</h1>
<div>
  <h2>Items</h2>
  {{#if items}}
  <dl>
    {{#each items}}
    <dt><a href="{{url}}">{{name}}</a></dt>
    <dd>{{description}}</dd>
    {{/each}}
  </dl>
  {{else}}
  <p>This category has no items.</p>
  {{/if}}
</div>
<hr>
<p><a href="{{category.url}}/delete">Delete category</a></p>
<p><a href="{{category.url}}/update">Update category</a></p>
"#;

pub(super) const CATEGORY_FORM: &str = r#"<h1>{{title}}</h1>
<form method="POST">
  <label for="name">Category:</label>
  <input type="text" id="name" name="name" placeholder="Fruit, Dairy, Bakery..." required value="{{name}}">
  <button type="submit">Submit</button>
</form>
{{#if errors}}
<ul class="errors">
  {{#each errors}}
  <li>{{message}}</li>
  {{/each}}
</ul>
{{/if}}
"#;

pub(super) const CATEGORY_DELETE: &str = r#"<h1>{{title}}: {{category.name}}</h1>
{{#if items}}
<p><strong>Delete the following items before attempting to delete this category.</strong></p>
<div>
  <h2>Items</h2>
  <dl>
    {{#each items}}
    <dt><a href="{{url}}">{{name}}</a></dt>
    <dd>{{description}}</dd>
    {{/each}}
  </dl>
</div>
{{else}}
<p>Do you really want to delete this category?</p>
<form method="POST">
  <button type="submit">Delete</button>
</form>
{{/if}}
"#;

pub(super) const ITEM_LIST: &str = r#"<h1>{{title}}</h1>
{{#if items}}
<ul>
  {{#each items}}
  <li><a href="{{url}}">{{name}}</a> <span class="muted">({{quantity}} in stock)</span></li>
  {{/each}}
</ul>
{{else}}
<p>There are no items.</p>
{{/if}}
"#;

pub(super) const ITEM_DETAIL: &str = r#"<h1>{{item.name}}</h1>
<p><strong>Description:</strong> {{item.description}}</p>
<p><strong>Price:</strong> {{item.price}}</p>
<p><strong>Quantity:</strong> {{item.quantity}}</p>
<p><strong>Category:</strong>
  {{#each categories}}
  <a href="{{url}}">{{name}}</a>{{#unless @last}},{{/unless}}
  {{else}}
  <span class="muted">none</span>
  {{/each}}
</p>
<hr>
<p><a href="{{item.url}}/delete">Delete item</a></p>
<p><a href="{{item.url}}/update">Update item</a></p>
"#;

pub(super) const ITEM_FORM: &str = r#"<h1>{{title}}</h1>
<form method="POST">
  <label for="name">Name:</label>
  <input type="text" id="name" name="name" placeholder="Name of item" required value="{{input.name}}">
  <label for="description">Description:</label>
  <textarea id="description" name="description" placeholder="Description" required>{{input.description}}</textarea>
  <label for="price">Price:</label>
  <input type="text" id="price" name="price" placeholder="1.99" required value="{{input.price}}">
  <label for="quantity">Quantity:</label>
  <input type="text" id="quantity" name="quantity" placeholder="10" required value="{{input.quantity}}">
  <label>Category:</label>
  <div>
    {{#each categories}}
    <span class="checkbox">
      <input type="checkbox" name="category" id="{{id}}" value="{{id}}"{{#if checked}} checked{{/if}}>
      <label for="{{id}}">{{name}}</label>
    </span>
    {{/each}}
  </div>
  <button type="submit">Submit</button>
</form>
{{#if errors}}
<ul class="errors">
  {{#each errors}}
  <li>{{message}}</li>
  {{/each}}
</ul>
{{/if}}
"#;

pub(super) const ITEM_DELETE: &str = r#"<h1>{{title}}: {{item.name}}</h1>
<p><strong>Description:</strong> {{item.description}}</p>
<p><strong>Price:</strong> {{item.price}}</p>
<p><strong>Quantity:</strong> {{item.quantity}}</p>
<p><strong>Category:</strong>
  {{#each categories}}
  <a href="{{url}}">{{name}}</a>{{#unless @last}},{{/unless}}
  {{/each}}
</p>
<p>Do you really want to delete this item?</p>
<form method="POST">
  <button type="submit">Delete</button>
</form>
"#;

pub(super) const ERROR: &str = r#"<h1>{{title}}</h1>
<p>{{message}}</p>
<p class="muted">{{status}} {{code}}</p>
"#;
